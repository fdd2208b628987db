use anyhow::Result;
use colored::Colorize;
use pipecost::{
    compare,
    config::Config,
    render::{self, ComparisonView},
    scenario,
};
use std::path::Path;

/// Execute the compare command
///
/// A failed lane is rendered next to the other lane's result; only a local
/// validation problem aborts before any request.
pub async fn execute(cfg: &Config, scenario_path: &Path) -> Result<()> {
    let mut session = scenario::load_scenario(scenario_path)?;
    let client = super::connect(&cfg.gemini)?;

    println!(
        "{}",
        format!("Comparing Option A and Option B on {}...", session.provider()).yellow()
    );
    let run = compare::compare_scenarios(&mut session, &client).await?;

    println!();
    render::print_comparison(&ComparisonView::from(&run));

    if run.a.is_err() && run.b.is_err() {
        anyhow::bail!("Both scenario estimates failed");
    }
    Ok(())
}
