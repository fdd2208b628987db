pub mod estimate;
pub mod gemini;
pub mod pipeline;

pub use estimate::{AlternativesSuggestion, BreakdownItem, CostEstimate, ServiceAlternative};
pub use pipeline::{CloudProvider, ComponentField, Frequency, FrequencyKind, PipelineComponent};
