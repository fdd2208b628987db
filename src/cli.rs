use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pipecost::session::Lane;

#[derive(Parser, Debug)]
#[command(name = "pipecost", version, about = "Data pipeline cost estimator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "pipecost.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate the monthly cost of a scenario's main pipeline
    Estimate {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },

    /// Estimate, then suggest cheaper service alternatives
    Alternatives {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },

    /// Compare Option A against Option B
    Compare {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },

    /// Print the prompt and reply schema without calling the model
    Prompt {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Which pipeline to describe
        #[arg(short, long, value_enum, default_value = "a")]
        lane: LaneArg,

        /// Show the alternatives prompt instead of the estimate prompt
        #[arg(short, long)]
        alternatives: bool,
    },

    /// Interactive session (default)
    Shell {
        /// Scenario file to start from
        scenario: Option<PathBuf>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with secrets masked)
    Show,

    /// Validate configuration file
    Validate,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneArg {
    A,
    B,
}

impl From<LaneArg> for Lane {
    fn from(lane: LaneArg) -> Self {
        match lane {
            LaneArg::A => Lane::A,
            LaneArg::B => Lane::B,
        }
    }
}

impl Cli {
    /// Get the command to execute, defaulting to an empty shell
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Shell { scenario: None })
    }
}
