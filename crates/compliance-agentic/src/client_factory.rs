//! Client Factory
//!
//! Builds the shared `LlmClient` for a backend.

use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::anthropic_client::AnthropicClient;
use crate::backend::AgentBackend;
use crate::llm_client::LlmClient;
use crate::openai_client::OpenAiClient;

/// Create a client for `backend`, reading its API key from the environment.
pub fn create_llm_client(backend: AgentBackend) -> Result<Arc<dyn LlmClient>> {
    let var = backend.api_key_var();
    let api_key = resolve_api_key(var, std::env::var(var).ok())?;
    Ok(create_llm_client_with_key(backend, api_key))
}

/// A blank key counts as unset.
fn resolve_api_key(var: &str, value: Option<String>) -> Result<String> {
    value
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow!("{} environment variable not set", var))
}

/// Create a client for `backend` with an explicit API key.
pub fn create_llm_client_with_key(backend: AgentBackend, api_key: String) -> Arc<dyn LlmClient> {
    match backend {
        AgentBackend::OpenAi => Arc::new(OpenAiClient::new(api_key)),
        AgentBackend::Anthropic => Arc::new(AnthropicClient::new(api_key)),
    }
}
