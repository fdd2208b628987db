/// Integration tests for the Gemini structured client against a mock endpoint
use pipecost::{
    config::{GeminiConfig, DEFAULT_MODEL},
    error::AiError,
    prompt::cost_estimate_schema,
    providers::{GeminiClient, StructuredClient},
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const API_KEY: &str = "AIzaSy-integration-test-key";
const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(GeminiConfig {
        api_key: API_KEY.to_string(),
        base_url: format!("{}/v1beta", server.uri()),
        model: DEFAULT_MODEL.to_string(),
        timeout_seconds: 5,
        temperature: None,
    })
    .unwrap()
}

/// generateContent reply whose first candidate carries `text`
fn reply_with_text(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 310,
            "candidatesTokenCount": 42,
            "totalTokenCount": 352
        },
        "modelVersion": "gemini-2.0-flash"
    })
}

async fn mount_reply(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_conforming_reply_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_partial_json(json!({
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_with_text(
            r#"{"totalMonthlyCost": 42.5, "breakdown": [{"component": "AWS Glue", "cost": 42.5}]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value = client
        .ask_structured("Estimate this pipeline", &cost_estimate_schema())
        .await
        .unwrap();

    assert_eq!(value["totalMonthlyCost"], 42.5);
    assert_eq!(value["breakdown"][0]["component"], "AWS Glue");
}

#[tokio::test]
async fn test_request_carries_prompt_and_schema() {
    let server = MockServer::start().await;
    let schema = cost_estimate_schema();
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "price it"}]}],
            "generationConfig": {"responseSchema": schema}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_with_text(
            r#"{"totalMonthlyCost": 0, "breakdown": []}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.ask_structured("price it", &schema).await.is_ok());
}

#[tokio::test]
async fn test_upstream_error_envelope() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted (e.g. check quota).",
                "status": "RESOURCE_EXHAUSTED"
            }
        })),
    )
    .await;

    let client = client_for(&server);
    let err = client
        .ask_structured("Estimate", &cost_estimate_schema())
        .await
        .unwrap_err();

    match err {
        AiError::Upstream { status, message } => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(
                message,
                "Resource has been exhausted (e.g. check quota). (RESOURCE_EXHAUSTED)"
            );
        }
        other => panic!("Expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_reply_is_malformed() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(reply_with_text("The pipeline would cost roughly $40 a month.")),
    )
    .await;

    let err = client_for(&server)
        .ask_structured("Estimate", &cost_estimate_schema())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Malformed(_)));
}

#[tokio::test]
async fn test_missing_required_field_is_schema_violation() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(reply_with_text(
            r#"{"breakdown": [{"component": "AWS Glue", "cost": 42.5}]}"#,
        )),
    )
    .await;

    let err = client_for(&server)
        .ask_structured("Estimate", &cost_estimate_schema())
        .await
        .unwrap_err();
    match err {
        AiError::SchemaViolation(message) => assert!(message.contains("totalMonthlyCost")),
        other => panic!("Expected SchemaViolation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_field_in_reply() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(reply_with_text(r#"{"error": "pricing data unavailable"}"#)),
    )
    .await;

    let err = client_for(&server)
        .ask_structured("Estimate", &cost_estimate_schema())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Service(msg) if msg == "pricing data unavailable"));
}

#[tokio::test]
async fn test_blocked_prompt_is_empty_response() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })),
    )
    .await;

    let err = client_for(&server)
        .ask_structured("Estimate", &cost_estimate_schema())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "model returned no content: prompt blocked (SAFETY)"
    );
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;

    let err = client_for(&server)
        .ask_structured("Estimate", &cost_estimate_schema())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Malformed(_)));
}
