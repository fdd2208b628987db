use anyhow::{Context, Result};
use colored::Colorize;
use pipecost::{
    config::Config,
    estimator,
    render::{self, AlternativesView, EstimateView},
    scenario,
};
use std::path::Path;

/// Execute the alternatives command
///
/// Suggestions are only requested once the pipeline has a current estimate,
/// so this runs the estimate first.
pub async fn execute(cfg: &Config, scenario_path: &Path) -> Result<()> {
    let mut session = scenario::load_scenario(scenario_path)?;
    let client = super::connect(&cfg.gemini)?;

    println!(
        "{}",
        format!("Estimating pipeline cost on {}...", session.provider()).yellow()
    );
    let estimate = estimator::generate_cost_estimate(&mut session, &client)
        .await
        .context("Cost estimate failed")?;
    println!();
    render::print_estimate(&EstimateView::from(estimate));
    println!();

    println!("{}", "Looking for cheaper alternatives...".yellow());
    let suggestion = estimator::suggest_alternatives(&mut session, &client)
        .await
        .context("Alternative suggestions failed")?;
    println!();
    render::print_alternatives(&AlternativesView::from(suggestion));
    Ok(())
}
