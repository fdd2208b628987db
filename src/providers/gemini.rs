use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::{
    config::GeminiConfig,
    error::AiError,
    logging::{truncate_for_log, SensitiveApiKey},
    models::gemini::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
    providers::{parse_structured_reply, StructuredClient},
};

/// Structured client backed by the Gemini generateContent API
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        // {base}/models/{model}:generateContent
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        // Key goes in a header so it never shows up in URL-bearing error messages
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => envelope.describe(),
                Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
                Err(_) => truncate_for_log(&body, 500),
            };
            return Err(AiError::Upstream { status, message });
        }

        serde_json::from_str(&body)
            .map_err(|e| AiError::Malformed(format!("unexpected Gemini response body: {}", e)))
    }
}

#[async_trait]
impl StructuredClient for GeminiClient {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn ask_structured(&self, prompt: &str, schema: &Value) -> Result<Value, AiError> {
        let started = Instant::now();
        let request = GenerateContentRequest::json_mode(prompt, schema, self.config.temperature);

        debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            api_key = %SensitiveApiKey::new(&self.config.api_key),
            "Sending structured request to Gemini"
        );

        let result = self.generate_content(&request).await.and_then(|response| {
            if let Some(usage) = &response.usage_metadata {
                debug!(
                    prompt_tokens = usage.prompt_token_count,
                    reply_tokens = usage.candidates_token_count,
                    total_tokens = usage.total_token_count,
                    "Gemini token usage"
                );
            }
            let text = response
                .first_text()
                .ok_or_else(|| AiError::EmptyResponse(response.no_content_reason()))?;
            parse_structured_reply(&text, schema).inspect_err(|_| {
                debug!(reply = %truncate_for_log(&text, 500), "Rejected Gemini reply")
            })
        });

        let latency_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => info!(model = %self.config.model, latency_ms, "Gemini reply accepted"),
            Err(e) => warn!(model = %self.config.model, latency_ms, error = %e, "Gemini request failed"),
        }

        result
    }
}
