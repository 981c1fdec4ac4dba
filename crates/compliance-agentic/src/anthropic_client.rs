//! Anthropic Client
//!
//! LLM client implementation for Anthropic Claude API.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::llm_client::{GenerationParams, LlmClient, ResponseSchema};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// The Messages API requires a token cap on every request
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic Claude API client
#[derive(Clone)]
pub struct AnthropicClient {
    api_key: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
    input: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

impl AnthropicClient {
    /// Create a new Anthropic client with the given API key
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn request_body(
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
        schema: Option<&ResponseSchema>,
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": &params.model,
            "max_tokens": params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "temperature": params.temperature,
            "system": system_prompt,
            "messages": [{"role": "user", "content": user_prompt}]
        });

        // Structured output is a forced call to a single tool carrying the schema
        if let Some(schema) = schema {
            body["tools"] = serde_json::json!([{
                "name": &schema.name,
                "description": &schema.description,
                "input_schema": &schema.schema
            }]);
            body["tool_choice"] = serde_json::json!({"type": "tool", "name": &schema.name});
        }

        body
    }

    /// Internal API call implementation
    async fn call_api(&self, body: &serde_json::Value) -> Result<ApiResponse> {
        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Anthropic API error {}: {}", status, body));
        }

        let api_response: ApiResponse = response.json().await?;
        Ok(api_response)
    }

    fn first_text(response: ApiResponse) -> Result<String> {
        response
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| anyhow!("Empty response from Anthropic"))
    }

    fn tool_input(response: ApiResponse, tool_name: &str) -> Result<serde_json::Value> {
        response
            .content
            .into_iter()
            .find(|block| block.kind == "tool_use")
            .and_then(|block| block.input)
            .ok_or_else(|| anyhow!("No tool_use block for '{}' in Anthropic response", tool_name))
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        let body = Self::request_body(system_prompt, user_prompt, params, None);
        let response = self.call_api(&body).await?;
        Self::first_text(response)
    }

    async fn chat_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
        schema: &ResponseSchema,
    ) -> Result<serde_json::Value> {
        let body = Self::request_body(system_prompt, user_prompt, params, Some(schema));
        let response = self.call_api(&body).await?;
        Self::tool_input(response, &schema.name)
    }

    fn provider_name(&self) -> &str {
        "Anthropic"
    }
}
