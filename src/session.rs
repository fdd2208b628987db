use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::{AlternativesSuggestion, CloudProvider, CostEstimate, PipelineComponent};

/// One side of a scenario comparison. Lane A is also the main pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    A,
    B,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A => "A",
            Self::B => "B",
        })
    }
}

impl FromStr for Lane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            other => Err(format!("unknown lane '{}' (expected a or b)", other)),
        }
    }
}

/// Per-user interaction state.
///
/// Owned by whoever drives the interaction and passed by `&mut` into every
/// flow. Nothing here outlives the process.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    provider: CloudProvider,
    option_a: Vec<PipelineComponent>,
    option_b: Vec<PipelineComponent>,
    estimate: Option<CostEstimate>,
    comparison_a: Option<CostEstimate>,
    comparison_b: Option<CostEstimate>,
    alternatives: Option<AlternativesSuggestion>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CloudProvider::default())
    }
}

impl Session {
    pub fn new(provider: CloudProvider) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider,
            option_a: Vec::new(),
            option_b: Vec::new(),
            estimate: None,
            comparison_a: None,
            comparison_b: None,
            alternatives: None,
        }
    }

    pub fn with_components(
        provider: CloudProvider,
        option_a: Vec<PipelineComponent>,
        option_b: Vec<PipelineComponent>,
    ) -> Self {
        Self {
            option_a,
            option_b,
            ..Self::new(provider)
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn provider(&self) -> CloudProvider {
        self.provider
    }

    pub fn set_provider(&mut self, provider: CloudProvider) {
        self.provider = provider;
    }

    pub fn components(&self, lane: Lane) -> &[PipelineComponent] {
        match lane {
            Lane::A => &self.option_a,
            Lane::B => &self.option_b,
        }
    }

    fn components_mut(&mut self, lane: Lane) -> &mut Vec<PipelineComponent> {
        match lane {
            Lane::A => &mut self.option_a,
            Lane::B => &mut self.option_b,
        }
    }

    /// Append a default row and hand it back for editing
    pub fn add_component(&mut self, lane: Lane) -> &mut PipelineComponent {
        let components = self.components_mut(lane);
        components.push(PipelineComponent::default());
        let last = components.len() - 1;
        &mut components[last]
    }

    /// Remove the last row; a no-op on an empty list
    pub fn remove_last(&mut self, lane: Lane) -> Option<PipelineComponent> {
        self.components_mut(lane).pop()
    }

    /// Row by zero-based index
    pub fn component_mut(&mut self, lane: Lane, index: usize) -> Option<&mut PipelineComponent> {
        self.components_mut(lane).get_mut(index)
    }

    /// Current single estimate of the main pipeline
    pub fn estimate(&self) -> Option<&CostEstimate> {
        self.estimate.as_ref()
    }

    pub fn comparison(&self, lane: Lane) -> Option<&CostEstimate> {
        match lane {
            Lane::A => self.comparison_a.as_ref(),
            Lane::B => self.comparison_b.as_ref(),
        }
    }

    pub fn alternatives(&self) -> Option<&AlternativesSuggestion> {
        self.alternatives.as_ref()
    }

    pub(crate) fn set_estimate(&mut self, estimate: Option<CostEstimate>) {
        self.estimate = estimate;
    }

    pub(crate) fn set_comparison(&mut self, lane: Lane, estimate: Option<CostEstimate>) {
        match lane {
            Lane::A => self.comparison_a = estimate,
            Lane::B => self.comparison_b = estimate,
        }
    }

    pub(crate) fn set_alternatives(&mut self, alternatives: Option<AlternativesSuggestion>) {
        self.alternatives = alternatives;
    }

    /// Reset every field together: provider back to the default, lists and results emptied
    pub fn clear(&mut self) {
        *self = Self {
            id: self.id,
            ..Self::default()
        };
    }
}
