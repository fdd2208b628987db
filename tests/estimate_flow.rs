/// End-to-end estimate, alternatives and comparison flows with a scripted client
use async_trait::async_trait;
use pipecost::{
    compare::{compare_scenarios, Verdict},
    error::{AiError, EstimateError, ValidationError},
    estimator::{generate_cost_estimate, suggest_alternatives},
    models::{CloudProvider, Frequency, PipelineComponent},
    providers::{parse_structured_reply, StructuredClient},
    render::{ComparisonView, EstimateView},
    scenario::parse_scenario,
    session::{Lane, Session},
};
use serde_json::Value;
use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::sync::Mutex;

/// Plays back raw model text through the same reply parser the Gemini client uses
struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<&str, AiError>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            ),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn ask_structured(&self, prompt: &str, schema: &Value) -> Result<Value, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected extra request")?;
        parse_structured_reply(&reply, schema)
    }
}

fn glue_each_run() -> PipelineComponent {
    PipelineComponent::new(
        "AWS Glue",
        "DPU-hours",
        10.0,
        "GB processed",
        Frequency::EachRun {
            runs_per_month: NonZeroU32::new(3).unwrap(),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_glue_pipeline_end_to_end() {
    let client = ScriptedClient::new(vec![Ok(
        r#"{"totalMonthlyCost": 42.5, "breakdown": [{"component": "AWS Glue", "cost": 42.5}]}"#,
    )]);
    let mut session = Session::with_components(CloudProvider::Aws, vec![glue_each_run()], vec![]);

    let estimate = generate_cost_estimate(&mut session, &client).await.unwrap();
    let view = EstimateView::from(estimate);

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0]
        .contains("- 10GB processed on AWS Glue for DPU-hours (running 3 times per month)"));
    assert!(prompts[0].contains("AWS"));
    assert_eq!(view.total, "$42.50");
    assert_eq!(view.breakdown[0].to_string(), "AWS Glue: $42.50");
}

#[tokio::test]
async fn test_snake_case_reply_is_accepted() {
    let client = ScriptedClient::new(vec![Ok(
        "```json\n{\"total_monthly_cost\": 120, \"breakdown\": [{\"component\": \"AWS Glue\", \"cost\": 120}], \"notes\": \"3 runs\"}\n```",
    )]);
    let mut session = Session::with_components(CloudProvider::Aws, vec![glue_each_run()], vec![]);

    let estimate = generate_cost_estimate(&mut session, &client).await.unwrap();
    assert_eq!(estimate.total_monthly_cost, 120.0);
    assert_eq!(estimate.notes.as_deref(), Some("3 runs"));
    assert_eq!(EstimateView::from(estimate).total, "$120.00");
}

#[tokio::test]
async fn test_all_invalid_rows_never_reach_the_model() {
    let client = ScriptedClient::new(vec![]);
    let mut session = Session::default();
    session.add_component(Lane::A).service = "S3".to_string();
    session.add_component(Lane::A);

    let err = generate_cost_estimate(&mut session, &client).await.unwrap_err();
    assert!(matches!(
        err,
        EstimateError::Validation(ValidationError::NoValidComponents)
    ));
    assert!(client.prompts().is_empty());
}

#[tokio::test]
async fn test_failed_estimate_hides_previous_total() {
    let client = ScriptedClient::new(vec![
        Ok(r#"{"totalMonthlyCost": 42.5, "breakdown": []}"#),
        Ok("Sorry, I cannot price that."),
    ]);
    let mut session = Session::with_components(CloudProvider::Aws, vec![glue_each_run()], vec![]);

    generate_cost_estimate(&mut session, &client).await.unwrap();
    let err = generate_cost_estimate(&mut session, &client).await.unwrap_err();

    assert!(err.is_ai());
    assert!(session.estimate().is_none());
}

#[tokio::test]
async fn test_alternatives_after_estimate() {
    let client = ScriptedClient::new(vec![
        Ok(r#"{"totalMonthlyCost": 42.5, "breakdown": [{"component": "AWS Glue", "cost": 42.5}]}"#),
        Ok(r#"```json
{"suggestions": [{"originalService": "AWS Glue", "alternativeService": "Amazon EMR Serverless", "explanation": "Cheaper for long-running Spark jobs"}]}
```"#),
    ]);
    let mut session = Session::with_components(CloudProvider::Aws, vec![glue_each_run()], vec![]);

    assert!(matches!(
        suggest_alternatives(&mut session, &client).await,
        Err(EstimateError::Validation(ValidationError::EstimateRequired))
    ));

    generate_cost_estimate(&mut session, &client).await.unwrap();
    let suggestion = suggest_alternatives(&mut session, &client).await.unwrap();
    assert_eq!(suggestion.suggestions.len(), 1);
    assert_eq!(
        suggestion.suggestions[0].alternative_service,
        "Amazon EMR Serverless"
    );
}

#[tokio::test]
async fn test_scenario_comparison_tie() {
    let mut session = parse_scenario(
        r#"
        provider = "AWS"

        [[option_a]]
        service = "Lambda"
        operation = "invocations"
        quantity = 10000
        unit = "count"
        frequency = "monthly"

        [[option_b]]
        service = "Fargate"
        operation = "vCPU-hours"
        quantity = 200
        unit = "hours"
        frequency = "monthly"
        "#,
    )
    .unwrap();
    let client = ScriptedClient::new(vec![
        Ok(r#"{"totalMonthlyCost": 120.00, "breakdown": [{"component": "Lambda", "cost": 120.0}]}"#),
        Ok(r#"{"totalMonthlyCost": 120.00, "breakdown": [{"component": "Fargate", "cost": 120.0}]}"#),
    ]);

    let run = compare_scenarios(&mut session, &client).await.unwrap();
    let view = ComparisonView::from(&run);

    assert_eq!(run.verdict(), Some(Verdict::Comparable));
    assert_eq!(view.a.as_ref().unwrap().total, "$120.00");
    assert_eq!(view.b.as_ref().unwrap().total, "$120.00");
    assert!(session.comparison(Lane::A).is_some());
    assert!(session.comparison(Lane::B).is_some());
}

#[tokio::test]
async fn test_comparison_lane_failure_keeps_other_lane() {
    let mut session = Session::with_components(
        CloudProvider::Gcp,
        vec![glue_each_run()],
        vec![PipelineComponent::new("Dataflow", "vCPU-hours", 50.0, "hours", Frequency::Daily).unwrap()],
    );
    let client = ScriptedClient::new(vec![
        Err(AiError::Service("quota exceeded".to_string())),
        Ok(r#"{"totalMonthlyCost": 75.25, "breakdown": []}"#),
    ]);

    let run = compare_scenarios(&mut session, &client).await.unwrap();
    let view = ComparisonView::from(&run);

    assert_eq!(
        view.a,
        Err("model service reported an error: quota exceeded".to_string())
    );
    assert_eq!(view.b.as_ref().unwrap().total, "$75.25");
    assert_eq!(view.verdict, None);
    assert_eq!(client.prompts().len(), 2);
    assert!(client.prompts()[1].contains("(daily)"));
}
