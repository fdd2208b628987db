//! Scripted structured client for unit tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::AiError;
use crate::providers::StructuredClient;

/// Replays canned replies in order and records every prompt it receives.
///
/// Replies are handed back without a schema check.
pub(crate) struct ScriptedClient {
    replies: Mutex<VecDeque<Result<Value, AiError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub(crate) fn new(replies: Vec<Result<Value, AiError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn ask_structured(&self, prompt: &str, _schema: &Value) -> Result<Value, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::EmptyResponse("no scripted reply left".to_string())))
    }
}
