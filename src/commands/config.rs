use anyhow::Result;
use colored::Colorize;
use pipecost::{
    config::{self, Config},
    logging::SensitiveApiKey,
};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!(path = %path.display(), "Validating configuration file");

    let cfg = config::load_config(path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}", "Config File".cyan(), describe_source(path));
    println!("  {}: {}", "Model".cyan(), cfg.gemini.model);
    println!("  {}: {}", "Endpoint".cyan(), cfg.gemini.base_url);
    println!("  {}: {}s", "Timeout".cyan(), cfg.gemini.timeout_seconds);
    if let Some(temperature) = cfg.gemini.temperature {
        println!("  {}: {}", "Temperature".cyan(), temperature);
    }
    println!(
        "  {}: {} ({})",
        "Logging".cyan(),
        cfg.logging.level,
        cfg.logging.format
    );

    match cfg.gemini.require_api_key() {
        Ok(()) => println!(
            "  {}: {}",
            "API Key".cyan(),
            SensitiveApiKey::new(&cfg.gemini.api_key)
        ),
        Err(e) => println!("  {}: {}", "API Key".cyan(), e.to_string().red()),
    }

    Ok(())
}

fn describe_source(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    }
}

/// Sanitize secrets in configuration for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.gemini.api_key = SensitiveApiKey::new(&cfg.gemini.api_key).to_string();
    sanitized
}
