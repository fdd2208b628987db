use anyhow::{Context, Result};
use colored::Colorize;
use pipecost::{
    config::Config,
    estimator,
    render::{self, EstimateView},
    scenario,
};
use std::path::Path;
use tracing::info;

/// Execute the estimate command
pub async fn execute(cfg: &Config, scenario_path: &Path) -> Result<()> {
    let mut session = scenario::load_scenario(scenario_path)?;
    let client = super::connect(&cfg.gemini)?;
    info!(session = %session.id(), scenario = %scenario_path.display(), "Estimating scenario");

    println!(
        "{}",
        format!("Estimating pipeline cost on {}...", session.provider()).yellow()
    );
    let estimate = estimator::generate_cost_estimate(&mut session, &client)
        .await
        .context("Cost estimate failed")?;

    println!();
    render::print_estimate(&EstimateView::from(estimate));
    Ok(())
}
