use thiserror::Error;

use crate::session::Lane;

/// Local, recoverable problems detected before any request is sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The pipeline has no components at all
    #[error("add at least one pipeline component to estimate costs")]
    EmptyPipeline,
    /// Every component is missing a service, quantity or unit
    #[error("no valid pipeline components provided; fill out service, quantity, and unit for each component")]
    NoValidComponents,
    /// No cloud provider was selected
    #[error("select a cloud provider (AWS, GCP or Azure)")]
    MissingProvider,
    /// A comparison lane has no component with a service name
    #[error("define Option {0} pipeline components before comparing scenarios")]
    MissingLane(Lane),
    /// Alternatives need a current cost estimate
    #[error("estimate the pipeline cost first to get alternative suggestions")]
    EstimateRequired,
    /// A component record or edit breaks the component invariants
    #[error("invalid component: {0}")]
    InvalidComponent(String),
}

/// Failures reported by the structured AI client.
#[derive(Debug, Error)]
pub enum AiError {
    /// Transport-level failure (connect, TLS, timeout)
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    /// The model service answered with a non-success status
    #[error("upstream error ({status}): {message}")]
    Upstream {
        status: reqwest::StatusCode,
        message: String,
    },
    /// The reply carried no usable text
    #[error("model returned no content: {0}")]
    EmptyResponse(String),
    /// The reply text was not a JSON object
    #[error("model reply was not valid JSON: {0}")]
    Malformed(String),
    /// The reply object carried an explicit error field
    #[error("model service reported an error: {0}")]
    Service(String),
    /// Required keys missing or mistyped
    #[error("model reply did not conform to expected schema: {0}")]
    SchemaViolation(String),
}

/// Result error of every estimate-producing flow.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Ai(#[from] AiError),
}

impl EstimateError {
    /// True when the failure came from the model service rather than local input.
    pub fn is_ai(&self) -> bool {
        matches!(self, Self::Ai(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingLane(Lane::B).to_string(),
            "define Option B pipeline components before comparing scenarios"
        );
        assert_eq!(
            ValidationError::EmptyPipeline.to_string(),
            "add at least one pipeline component to estimate costs"
        );
    }

    #[test]
    fn test_estimate_error_is_transparent() {
        let err = EstimateError::from(AiError::Service("quota exceeded".to_string()));
        assert!(err.is_ai());
        assert_eq!(err.to_string(), "model service reported an error: quota exceeded");

        let err = EstimateError::from(ValidationError::NoValidComponents);
        assert!(!err.is_ai());
    }

    #[test]
    fn test_upstream_error_display() {
        let err = AiError::Upstream {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            message: "Resource has been exhausted".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "upstream error (429 Too Many Requests): Resource has been exhausted"
        );
    }
}
