//! TOML scenario files: a provider plus the two pipeline lanes.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::error::ValidationError;
use crate::models::{CloudProvider, PipelineComponent};
use crate::session::Session;

/// On-disk scenario
///
/// ```toml
/// provider = "AWS"
///
/// [[option_a]]
/// service = "AWS Glue"
/// operation = "DPU-hours"
/// quantity = 10
/// unit = "GB processed"
/// frequency = "each_run"
/// runs_per_month = 3
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    #[serde(default)]
    pub provider: Option<CloudProvider>,
    #[serde(default, alias = "pipeline")]
    pub option_a: Vec<PipelineComponent>,
    #[serde(default)]
    pub option_b: Vec<PipelineComponent>,
}

impl ScenarioFile {
    pub fn into_session(self) -> Result<Session, ValidationError> {
        let provider = self.provider.ok_or(ValidationError::MissingProvider)?;
        Ok(Session::with_components(provider, self.option_a, self.option_b))
    }
}

pub fn parse_scenario(content: &str) -> anyhow::Result<Session> {
    let file: ScenarioFile = toml::from_str(content)?;
    Ok(file.into_session()?)
}

pub fn load_scenario(path: &Path) -> anyhow::Result<Session> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    parse_scenario(&content).with_context(|| format!("Invalid scenario file {}", path.display()))
}
