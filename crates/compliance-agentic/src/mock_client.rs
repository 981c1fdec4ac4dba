//! Mock LLM Client
//!
//! Scripted `LlmClient` for exercising the pipeline without an API key.
//! Replies are consumed in order; every call is recorded for later inspection.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::llm_client::{GenerationParams, LlmClient, ResponseSchema};

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Structured(serde_json::Value),
    /// Simulated transport failure
    Failure(String),
}

/// A call observed by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub params: GenerationParams,
    /// Set for structured calls
    pub schema_name: Option<String>,
}

#[derive(Default)]
pub struct MockLlmClient {
    replies: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: MockReply) -> Self {
        lock(&self.replies).push_back(reply);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_reply(MockReply::Text(text.into()))
    }

    pub fn with_structured(self, value: serde_json::Value) -> Self {
        self.with_reply(MockReply::Structured(value))
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.with_reply(MockReply::Failure(message.into()))
    }

    /// Calls seen so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn next_reply(&self, call: RecordedCall) -> Result<MockReply> {
        lock(&self.calls).push(call);
        lock(&self.replies)
            .pop_front()
            .ok_or_else(|| anyhow!("MockLlmClient has no scripted reply left"))
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        let reply = self.next_reply(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            params: params.clone(),
            schema_name: None,
        })?;

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Structured(value) => Ok(value.to_string()),
            MockReply::Failure(message) => Err(anyhow!(message)),
        }
    }

    async fn chat_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
        schema: &ResponseSchema,
    ) -> Result<serde_json::Value> {
        let reply = self.next_reply(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            params: params.clone(),
            schema_name: Some(schema.name.clone()),
        })?;

        match reply {
            MockReply::Structured(value) => Ok(value),
            MockReply::Text(text) => serde_json::from_str(&text)
                .map_err(|e| anyhow!("scripted text is not valid JSON: {}", e)),
            MockReply::Failure(message) => Err(anyhow!(message)),
        }
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
