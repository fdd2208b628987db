use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::ValidationError;

/// Cloud platform the pipeline is priced on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CloudProvider {
    #[default]
    #[serde(rename = "AWS", alias = "aws")]
    Aws,
    #[serde(rename = "GCP", alias = "gcp")]
    Gcp,
    #[serde(rename = "Azure", alias = "azure", alias = "AZURE")]
    Azure,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 3] = [Self::Aws, Self::Gcp, Self::Azure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Gcp => "GCP",
            Self::Azure => "Azure",
        }
    }

    /// Region the model is told to assume for on-demand pricing
    pub fn standard_region(&self) -> &'static str {
        match self {
            Self::Aws => "us-east-1",
            Self::Gcp => "us-central1",
            Self::Azure => "East US",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(Self::Aws),
            "gcp" => Ok(Self::Gcp),
            "azure" => Ok(Self::Azure),
            other => Err(format!(
                "unknown cloud provider '{}' (expected AWS, GCP or Azure)",
                other
            )),
        }
    }
}

/// Billing cadence of a component.
///
/// The run count only exists for `EachRun`, so a monthly or daily component
/// can never carry a stale `runs_per_month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
    Daily,
    EachRun { runs_per_month: NonZeroU32 },
}

impl Frequency {
    pub fn kind(&self) -> FrequencyKind {
        match self {
            Self::Monthly => FrequencyKind::Monthly,
            Self::Daily => FrequencyKind::Daily,
            Self::EachRun { .. } => FrequencyKind::EachRun,
        }
    }

    pub fn runs_per_month(&self) -> Option<NonZeroU32> {
        match self {
            Self::EachRun { runs_per_month } => Some(*runs_per_month),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}

/// Frequency without its payload, as it appears in scenario files and edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyKind {
    Monthly,
    Daily,
    #[serde(alias = "each run", alias = "each-run")]
    EachRun,
}

impl fmt::Display for FrequencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Monthly => "monthly",
            Self::Daily => "daily",
            Self::EachRun => "each run",
        })
    }
}

impl FromStr for FrequencyKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "monthly" => Ok(Self::Monthly),
            "daily" => Ok(Self::Daily),
            "each_run" => Ok(Self::EachRun),
            other => Err(ValidationError::InvalidComponent(format!(
                "unknown frequency '{}' (expected monthly, daily or each_run)",
                other
            ))),
        }
    }
}

/// Editable field of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentField {
    Service,
    Operation,
    Quantity,
    Unit,
    Frequency,
    RunsPerMonth,
}

impl FromStr for ComponentField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "service" => Ok(Self::Service),
            "operation" | "metric" => Ok(Self::Operation),
            "quantity" | "qty" => Ok(Self::Quantity),
            "unit" => Ok(Self::Unit),
            "frequency" | "freq" => Ok(Self::Frequency),
            "runs" | "runs_per_month" => Ok(Self::RunsPerMonth),
            other => Err(ValidationError::InvalidComponent(format!(
                "unknown field '{}'",
                other
            ))),
        }
    }
}

/// One billed unit of a data pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ComponentRecord", into = "ComponentRecord")]
pub struct PipelineComponent {
    pub service: String,
    pub operation: String,
    quantity: Option<f64>,
    pub unit: String,
    pub frequency: Option<Frequency>,
}

impl Default for PipelineComponent {
    /// A freshly appended row
    fn default() -> Self {
        Self {
            service: String::new(),
            operation: String::new(),
            quantity: Some(0.0),
            unit: String::new(),
            frequency: Some(Frequency::Monthly),
        }
    }
}

impl PipelineComponent {
    pub fn new(
        service: impl Into<String>,
        operation: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        frequency: Frequency,
    ) -> Result<Self, ValidationError> {
        check_quantity(quantity)?;
        Ok(Self {
            service: service.into(),
            operation: operation.into(),
            quantity: Some(quantity),
            unit: unit.into(),
            frequency: Some(frequency),
        })
    }

    pub fn quantity(&self) -> Option<f64> {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: Option<f64>) -> Result<(), ValidationError> {
        if let Some(q) = quantity {
            check_quantity(q)?;
        }
        self.quantity = quantity;
        Ok(())
    }

    pub fn has_service(&self) -> bool {
        !self.service.is_empty()
    }

    /// Service and unit filled in, quantity present
    pub fn is_valid(&self) -> bool {
        self.has_service() && !self.unit.is_empty() && self.quantity.is_some()
    }

    /// Switch cadence. Moving to `each_run` keeps a previous run count or starts at 1.
    pub fn set_frequency_kind(&mut self, kind: FrequencyKind) {
        self.frequency = Some(match kind {
            FrequencyKind::Monthly => Frequency::Monthly,
            FrequencyKind::Daily => Frequency::Daily,
            FrequencyKind::EachRun => Frequency::EachRun {
                runs_per_month: self
                    .frequency
                    .and_then(|f| f.runs_per_month())
                    .unwrap_or(NonZeroU32::MIN),
            },
        });
    }

    pub fn set_runs_per_month(&mut self, runs: u32) -> Result<(), ValidationError> {
        match self.frequency {
            Some(Frequency::EachRun { .. }) => {
                let runs_per_month = NonZeroU32::new(runs).ok_or_else(|| {
                    ValidationError::InvalidComponent(
                        "runs_per_month must be at least 1".to_string(),
                    )
                })?;
                self.frequency = Some(Frequency::EachRun { runs_per_month });
                Ok(())
            }
            _ => Err(ValidationError::InvalidComponent(
                "runs_per_month only applies to each_run components".to_string(),
            )),
        }
    }

    /// Apply a single form edit given as text
    pub fn apply_edit(&mut self, field: ComponentField, value: &str) -> Result<(), ValidationError> {
        let value = value.trim();
        match field {
            ComponentField::Service => self.service = value.to_string(),
            ComponentField::Operation => self.operation = value.to_string(),
            ComponentField::Unit => self.unit = value.to_string(),
            ComponentField::Quantity => {
                let quantity = if value.is_empty() {
                    None
                } else {
                    Some(value.parse::<f64>().map_err(|_| {
                        ValidationError::InvalidComponent(format!(
                            "quantity '{}' is not a number",
                            value
                        ))
                    })?)
                };
                self.set_quantity(quantity)?;
            }
            ComponentField::Frequency => self.set_frequency_kind(value.parse()?),
            ComponentField::RunsPerMonth => {
                let runs = value.parse::<u32>().map_err(|_| {
                    ValidationError::InvalidComponent(format!(
                        "runs_per_month '{}' is not a positive integer",
                        value
                    ))
                })?;
                self.set_runs_per_month(runs)?;
            }
        }
        Ok(())
    }
}

fn check_quantity(quantity: f64) -> Result<(), ValidationError> {
    if quantity.is_finite() && quantity >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidComponent(format!(
            "quantity must be a non-negative number, got {}",
            quantity
        )))
    }
}

/// Flat on-disk shape of a component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComponentRecord {
    #[serde(default)]
    service: String,
    #[serde(default)]
    operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quantity: Option<f64>,
    #[serde(default)]
    unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frequency: Option<FrequencyKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    runs_per_month: Option<u32>,
}

impl TryFrom<ComponentRecord> for PipelineComponent {
    type Error = ValidationError;

    fn try_from(record: ComponentRecord) -> Result<Self, Self::Error> {
        let label = if record.service.is_empty() {
            "<unnamed>"
        } else {
            record.service.as_str()
        };
        let invalid = |msg: &str| ValidationError::InvalidComponent(format!("{}: {}", label, msg));

        let frequency = match (record.frequency, record.runs_per_month) {
            (Some(FrequencyKind::EachRun), Some(runs)) => Some(Frequency::EachRun {
                runs_per_month: NonZeroU32::new(runs)
                    .ok_or_else(|| invalid("runs_per_month must be at least 1"))?,
            }),
            (Some(FrequencyKind::EachRun), None) => {
                return Err(invalid("runs_per_month is required when frequency is each_run"))
            }
            (_, Some(_)) => {
                return Err(invalid("runs_per_month only applies to each_run components"))
            }
            (Some(FrequencyKind::Monthly), None) => Some(Frequency::Monthly),
            (Some(FrequencyKind::Daily), None) => Some(Frequency::Daily),
            (None, None) => None,
        };

        if let Some(q) = record.quantity {
            check_quantity(q).map_err(|_| invalid("quantity must be a non-negative number"))?;
        }

        Ok(Self {
            service: record.service,
            operation: record.operation,
            quantity: record.quantity,
            unit: record.unit,
            frequency,
        })
    }
}

impl From<PipelineComponent> for ComponentRecord {
    fn from(component: PipelineComponent) -> Self {
        Self {
            service: component.service,
            operation: component.operation,
            quantity: component.quantity,
            unit: component.unit,
            frequency: component.frequency.map(|f| f.kind()),
            runs_per_month: component
                .frequency
                .and_then(|f| f.runs_per_month())
                .map(NonZeroU32::get),
        }
    }
}
