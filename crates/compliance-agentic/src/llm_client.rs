//! LLM Client Trait
//!
//! Unified interface for LLM providers (OpenAI, Anthropic).

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{SchemaError, StructuredError};

/// Per-call generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Provider model identifier (e.g., "gpt-4o")
    pub model: String,
    /// Sampling temperature; low values keep output factual
    pub temperature: f32,
    /// Upper bound on generated tokens, `None` for the provider default
    pub max_tokens: Option<u32>,
}

impl GenerationParams {
    pub fn new(model: impl Into<String>, temperature: f32, max_tokens: Option<u32>) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens,
        }
    }
}

/// JSON Schema handed to the provider's structured-output feature.
///
/// - OpenAI: maps to `response_format` with `type: json_schema` and `strict: true`
/// - Anthropic: maps to a single tool whose `input_schema` is the schema, forced via `tool_choice`
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    /// Schema name (e.g., "compliance_report")
    pub name: String,
    /// Description of what the payload represents
    pub description: String,
    /// JSON Schema document
    pub schema: serde_json::Value,
}

/// Unified LLM client interface for both OpenAI and Anthropic
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Call the LLM with system + user prompts, return raw text response
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String>;

    /// Call the LLM with a schema binding, return the structured payload as JSON.
    ///
    /// Implementations must ask the provider to enforce `schema`. The returned
    /// value is not checked against any Rust type here; see [`generate_structured`].
    async fn chat_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
        schema: &ResponseSchema,
    ) -> Result<serde_json::Value>;

    /// Get the provider name for logging
    fn provider_name(&self) -> &str;
}

/// Request structured output and bind it to `T`.
///
/// Provider failures come back as [`StructuredError::Upstream`]; a payload that
/// does not deserialize into `T` comes back as [`StructuredError::Schema`].
/// There is no best-effort fallback.
pub async fn generate_structured<T: DeserializeOwned>(
    client: &dyn LlmClient,
    system_prompt: &str,
    user_prompt: &str,
    params: &GenerationParams,
    schema: &ResponseSchema,
) -> Result<T, StructuredError> {
    let value = client
        .chat_structured(system_prompt, user_prompt, params, schema)
        .await
        .map_err(StructuredError::Upstream)?;

    serde_json::from_value(value).map_err(|source| {
        StructuredError::Schema(SchemaError::Mismatch {
            schema: schema.name.clone(),
            source,
        })
    })
}
