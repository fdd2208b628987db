use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use pipecost::{config, config::LoggingConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    match args.get_command() {
        cli::Commands::Version => {
            println!("pipecost v{}", env!("CARGO_PKG_VERSION"));
        }
        // Config subcommands load (and report on) the file themselves
        cli::Commands::Config { action } => {
            init_tracing(&LoggingConfig::default());
            match action {
                cli::ConfigCommands::Show => commands::config::show(&args.config)?,
                cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
            }
        }
        command => {
            let cfg = config::load_config(&args.config)?;
            init_tracing(&cfg.logging);
            run(command, &cfg).await?;
        }
    }

    Ok(())
}

/// Dispatch to appropriate command handler
async fn run(command: cli::Commands, cfg: &config::Config) -> Result<()> {
    match command {
        cli::Commands::Estimate { scenario } => {
            commands::estimate::execute(cfg, &scenario).await?;
        }
        cli::Commands::Alternatives { scenario } => {
            commands::alternatives::execute(cfg, &scenario).await?;
        }
        cli::Commands::Compare { scenario } => {
            commands::compare::execute(cfg, &scenario).await?;
        }
        cli::Commands::Prompt {
            scenario,
            lane,
            alternatives,
        } => {
            commands::prompt::execute(&scenario, lane.into(), alternatives)?;
        }
        cli::Commands::Shell { scenario } => {
            commands::shell::execute(cfg, scenario.as_deref()).await?;
        }
        cli::Commands::Config { .. } | cli::Commands::Version => {}
    }
    Ok(())
}
