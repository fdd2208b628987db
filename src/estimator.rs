//! Single-estimate and alternatives flows.
//!
//! Each flow validates locally, builds its prompt, asks the client once and
//! stores the typed result in the session. A failed AI call clears the slot
//! in the same step that reports the error.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};

use crate::error::{AiError, EstimateError, ValidationError};
use crate::models::{AlternativesSuggestion, CloudProvider, CostEstimate, PipelineComponent};
use crate::prompt::{self, StructuredPrompt};
use crate::providers::StructuredClient;
use crate::session::{Lane, Session};

/// Validate, prompt and decode one cost estimate without touching any session slot
pub async fn request_estimate(
    client: &dyn StructuredClient,
    provider: CloudProvider,
    components: &[PipelineComponent],
) -> Result<CostEstimate, EstimateError> {
    let request = prompt::cost_estimate_prompt(provider, components)?;
    ask_typed(client, &request).await
}

/// Estimate the main pipeline and store the result as the current estimate.
///
/// Validation failures leave the slot untouched and never reach the client.
pub async fn generate_cost_estimate<'s>(
    session: &'s mut Session,
    client: &dyn StructuredClient,
) -> Result<&'s CostEstimate, EstimateError> {
    let request = prompt::cost_estimate_prompt(session.provider(), session.components(Lane::A))?;

    let span = info_span!(
        "estimate",
        session = %session.id(),
        provider = %session.provider(),
        client = client.provider_name()
    );
    let result = ask_typed::<CostEstimate>(client, &request)
        .instrument(span)
        .await;

    match result {
        Ok(estimate) => {
            info!(
                session = %session.id(),
                total = estimate.total_monthly_cost,
                items = estimate.breakdown.len(),
                "Cost estimate generated"
            );
            session.set_estimate(Some(estimate));
            session
                .estimate()
                .ok_or_else(|| AiError::EmptyResponse("estimate was not stored".to_string()).into())
        }
        Err(e) => {
            warn!(session = %session.id(), error = %e, "Cost estimate failed");
            session.set_estimate(None);
            Err(e)
        }
    }
}

/// Ask for cheaper alternatives to the main pipeline.
///
/// Requires a current estimate; a failed call clears any previous suggestions.
pub async fn suggest_alternatives<'s>(
    session: &'s mut Session,
    client: &dyn StructuredClient,
) -> Result<&'s AlternativesSuggestion, EstimateError> {
    if session.estimate().is_none() || session.components(Lane::A).is_empty() {
        return Err(ValidationError::EstimateRequired.into());
    }
    let request = prompt::alternatives_prompt(session.provider(), session.components(Lane::A))?;

    let span = info_span!("alternatives", session = %session.id(), provider = %session.provider());
    let result = ask_typed::<AlternativesSuggestion>(client, &request)
        .instrument(span)
        .await;

    match result {
        Ok(suggestion) => {
            info!(
                session = %session.id(),
                suggestions = suggestion.suggestions.len(),
                "Alternative suggestions generated"
            );
            session.set_alternatives(Some(suggestion));
            session.alternatives().ok_or_else(|| {
                AiError::EmptyResponse("suggestions were not stored".to_string()).into()
            })
        }
        Err(e) => {
            warn!(session = %session.id(), error = %e, "Alternative suggestions failed");
            session.set_alternatives(None);
            Err(e)
        }
    }
}

/// Send a prompt and decode the conforming reply into `T`
pub(crate) async fn ask_typed<T: DeserializeOwned>(
    client: &dyn StructuredClient,
    request: &StructuredPrompt,
) -> Result<T, EstimateError> {
    let value: Value = client.ask_structured(&request.prompt, &request.schema).await?;
    serde_json::from_value(value)
        .map_err(|e| AiError::SchemaViolation(e.to_string()).into())
}
