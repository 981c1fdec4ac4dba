//! OpenAI Client
//!
//! LLM client implementation for the OpenAI chat completions API.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::llm_client::{GenerationParams, LlmClient, ResponseSchema};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new OpenAI client with the given API key
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
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ],
            "temperature": params.temperature
        });

        if let Some(max_tokens) = params.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(schema) = schema {
            body["response_format"] = serde_json::json!({
                "type": "json_schema",
                "json_schema": {
                    "name": &schema.name,
                    "description": &schema.description,
                    "schema": &schema.schema,
                    "strict": true
                }
            });
        }

        body
    }

    /// Internal API call implementation, returns the first choice's message content
    async fn call_api(&self, body: &serde_json::Value) -> Result<String> {
        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("OpenAI API error {}: {}", status, body));
        }

        let response_text = response.text().await?;
        tracing::debug!("OpenAI raw response: {}", truncate(&response_text, 1000));

        Self::parse_content(&response_text)
    }

    fn parse_content(response_text: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct Message {
            content: Option<String>,
            refusal: Option<String>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        let api_response: ApiResponse = serde_json::from_str(response_text)
            .map_err(|e| anyhow!("Failed to parse OpenAI response: {}", e))?;

        let message = api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| anyhow!("OpenAI returned no choices"))?;

        if let Some(refusal) = message.refusal {
            return Err(anyhow!("OpenAI refused the request: {}", refusal));
        }

        message
            .content
            .ok_or_else(|| anyhow!("OpenAI returned an empty message"))
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        let body = Self::request_body(system_prompt, user_prompt, params, None);
        self.call_api(&body).await
    }

    async fn chat_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
        schema: &ResponseSchema,
    ) -> Result<serde_json::Value> {
        let body = Self::request_body(system_prompt, user_prompt, params, Some(schema));
        let content = self.call_api(&body).await?;
        serde_json::from_str(&content)
            .map_err(|e| anyhow!("OpenAI structured output is not valid JSON: {}", e))
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}
