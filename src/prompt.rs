//! Prompt and reply-schema construction.
//!
//! The single estimate and both comparison lanes go through
//! [`cost_estimate_prompt`], so the three call sites always send the same
//! template. Output is deterministic: identical inputs yield byte-identical
//! prompt text and schema.

use serde_json::{json, Value};

use crate::error::ValidationError;
use crate::models::{CloudProvider, Frequency, PipelineComponent};

/// A prompt paired with the JSON schema its reply must satisfy
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPrompt {
    pub prompt: String,
    pub schema: Value,
}

/// Render one component as a pipeline description line
pub fn describe_component(component: &PipelineComponent) -> String {
    let quantity = component
        .quantity()
        .map(|q| q.to_string())
        .unwrap_or_default();
    let mut line = format!(
        "- {}{} on {} for {}",
        quantity, component.unit, component.service, component.operation
    );
    match component.frequency {
        Some(Frequency::EachRun { runs_per_month }) => {
            line.push_str(&format!(" (running {} times per month)", runs_per_month));
        }
        Some(frequency) => line.push_str(&format!(" ({})", frequency)),
        None => {}
    }
    line
}

/// Components that can be priced; the rest are dropped without error
pub fn valid_components(components: &[PipelineComponent]) -> Vec<&PipelineComponent> {
    components.iter().filter(|c| c.is_valid()).collect()
}

/// One description line per valid component, in input order
pub fn describe_pipeline(components: &[PipelineComponent]) -> Vec<String> {
    valid_components(components)
        .into_iter()
        .map(describe_component)
        .collect()
}

/// Schema of a cost estimate reply
pub fn cost_estimate_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "totalMonthlyCost": {
                "type": "number",
                "description": "Total estimated monthly cost in USD."
            },
            "breakdown": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "component": {
                            "type": "string",
                            "description": "Cloud service component, e.g. AWS Glue, BigQuery, Data Factory."
                        },
                        "cost": {
                            "type": "number",
                            "description": "Estimated monthly cost for this component in USD."
                        }
                    },
                    "required": ["component", "cost"]
                }
            },
            "notes": {
                "type": "string",
                "description": "Assumptions made and considerations for the estimate."
            }
        },
        "required": ["totalMonthlyCost", "breakdown"]
    })
}

/// Schema of an alternatives reply
pub fn alternatives_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "suggestions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "originalService": {"type": "string"},
                        "alternativeService": {"type": "string"},
                        "explanation": {
                            "type": "string",
                            "description": "Typical use case and trade-offs of the alternative."
                        }
                    },
                    "required": ["originalService", "alternativeService", "explanation"]
                }
            },
            "notes": {"type": "string"}
        },
        "required": ["suggestions"]
    })
}

/// Build the monthly cost estimate prompt for a pipeline.
///
/// Fails when the list is empty or holds no valid component, so callers never
/// send an empty pipeline to the model.
pub fn cost_estimate_prompt(
    provider: CloudProvider,
    components: &[PipelineComponent],
) -> Result<StructuredPrompt, ValidationError> {
    if components.is_empty() {
        return Err(ValidationError::EmptyPipeline);
    }
    let lines = describe_pipeline(components);
    if lines.is_empty() {
        return Err(ValidationError::NoValidComponents);
    }

    let schema = cost_estimate_schema();
    let prompt = format!(
        "You are an expert cloud cost estimator. Estimate the monthly operational cost of the data pipeline below when it runs on {provider}.\n\
         \n\
         Give a breakdown by service and a total monthly cost. If a cost is negligible or cannot be estimated precisely without more context, say so in the notes.\n\
         Normalize every cost to a monthly figure. Use typical on-demand pricing for {provider} in a standard region ({region}), assuming no significant discounts or reserved capacity unless stated.\n\
         \n\
         Pipeline configuration:\n\
         {lines}\n\
         \n\
         Return only a JSON object matching this schema, with no surrounding text:\n\
         {schema}\n",
        provider = provider,
        region = provider.standard_region(),
        lines = lines.join("\n"),
        schema = pretty(&schema),
    );

    Ok(StructuredPrompt { prompt, schema })
}

/// Build the cheaper-alternatives prompt.
///
/// Every row with a service name is described, even if its quantity or unit
/// is still blank.
pub fn alternatives_prompt(
    provider: CloudProvider,
    components: &[PipelineComponent],
) -> Result<StructuredPrompt, ValidationError> {
    let lines: Vec<String> = components
        .iter()
        .filter(|c| c.has_service())
        .map(describe_component)
        .collect();
    if lines.is_empty() {
        return Err(ValidationError::EmptyPipeline);
    }

    let schema = alternatives_schema();
    let prompt = format!(
        "You are a cloud cost optimization expert. Suggest cheaper service alternatives, where applicable, for the following data pipeline components running on {provider}.\n\
         For each suggestion, briefly explain the alternative, its typical use case, and its trade-offs (performance, level of management).\n\
         Prefer alternatives within {provider}, but mention cross-cloud options when they are clearly beneficial.\n\
         \n\
         Current pipeline components:\n\
         {lines}\n\
         \n\
         Return only a JSON object matching this schema, with no surrounding text:\n\
         {schema}\n",
        provider = provider,
        lines = lines.join("\n"),
        schema = pretty(&schema),
    );

    Ok(StructuredPrompt { prompt, schema })
}

fn pretty(schema: &Value) -> String {
    serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string())
}
