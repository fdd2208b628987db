pub mod gemini;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AiError;
use crate::schema;

pub use gemini::GeminiClient;

/// Structured request/response boundary to an external model.
///
/// Implementations own transport, authentication and model selection. A
/// successful call always returns an object that satisfies `schema`'s
/// required fields; anything else is reported as an [`AiError`].
#[async_trait]
pub trait StructuredClient: Send + Sync {
    /// Short provider name used in logs
    fn provider_name(&self) -> &str;

    /// Send `prompt` and return the reply decoded as JSON conforming to `schema`
    async fn ask_structured(&self, prompt: &str, schema: &Value) -> Result<Value, AiError>;
}

/// Turn raw model text into a schema-conforming JSON value.
///
/// Markdown code fences around the JSON are tolerated, and snake_case keys are
/// renamed to the schema's spelling. An object carrying an `error` field is
/// treated as a service-reported failure.
pub fn parse_structured_reply(text: &str, schema: &Value) -> Result<Value, AiError> {
    let body = strip_code_fences(text);
    let mut value: Value =
        serde_json::from_str(body).map_err(|e| AiError::Malformed(e.to_string()))?;

    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let message = error
            .as_str()
            .map(str::to_string)
            .or_else(|| {
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| error.to_string());
        return Err(AiError::Service(message));
    }

    schema::normalize_keys(&mut value, schema);
    schema::check_conformance(&value, schema).map_err(AiError::SchemaViolation)?;
    Ok(value)
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag on the opening fence, which may share the body's line
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}
