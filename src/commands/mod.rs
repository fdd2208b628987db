//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - estimate: Single monthly estimate of a scenario's main pipeline
//! - alternatives: Estimate followed by cheaper service suggestions
//! - compare: Option A vs Option B with a verdict
//! - prompt: Print the prompt that would be sent
//! - shell: Interactive session
//! - config: Configuration display and validation

pub mod alternatives;
pub mod compare;
pub mod config;
pub mod estimate;
pub mod prompt;
pub mod shell;

use anyhow::Result;
use pipecost::{config::GeminiConfig, providers::GeminiClient};

/// Build the Gemini client, failing early when no key is configured
pub fn connect(gemini: &GeminiConfig) -> Result<GeminiClient> {
    gemini.require_api_key()?;
    Ok(GeminiClient::new(gemini.clone())?)
}
