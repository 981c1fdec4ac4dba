//! Process configuration, read once at startup.
//!
//! Env vars:
//!   AGENT_BACKEND        — openai (default) | anthropic
//!   OPENAI_API_KEY / ANTHROPIC_API_KEY — credential for the chosen backend (required)
//!   AUDITOR_BIND_ADDR    — listen address (default: 127.0.0.1:8000)
//!   AUDITOR_POLICY_PATH  — optional YAML file replacing the stage prompts
//!   AUDITOR_DRAFT_MODEL, AUDITOR_AUDIT_MODEL, AUDITOR_FINAL_MODEL — per-stage model overrides

use std::path::PathBuf;

use anyhow::{Context, Result};
use compliance_agentic::{AgentBackend, PipelineConfig, PromptPolicy, StageSettings};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub backend: AgentBackend,
    pub policy_path: Option<PathBuf>,
    pub draft_model: Option<String>,
    pub audit_model: Option<String>,
    pub final_model: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("AGENT_BACKEND") {
            Some(value) => value
                .parse::<AgentBackend>()
                .map_err(|e| anyhow::anyhow!("{}", e))?,
            None => AgentBackend::default(),
        };

        Ok(Self {
            bind_addr: get("AUDITOR_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            backend,
            policy_path: get("AUDITOR_POLICY_PATH").map(PathBuf::from),
            draft_model: get("AUDITOR_DRAFT_MODEL"),
            audit_model: get("AUDITOR_AUDIT_MODEL"),
            final_model: get("AUDITOR_FINAL_MODEL"),
        })
    }

    /// Prompt policy (file or built-in) plus stage settings for the backend.
    pub async fn pipeline_config(&self) -> Result<PipelineConfig> {
        let policy = match &self.policy_path {
            Some(path) => PromptPolicy::load(path)
                .await
                .with_context(|| format!("loading prompt policy from {}", path.display()))?,
            None => PromptPolicy::default(),
        };

        let stages = StageSettings::for_backend(self.backend).with_models(
            self.draft_model.clone(),
            self.audit_model.clone(),
            self.final_model.clone(),
        );

        Ok(PipelineConfig { policy, stages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.backend, AgentBackend::OpenAi);
        assert!(config.policy_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("AGENT_BACKEND", "claude"),
            ("AUDITOR_BIND_ADDR", "0.0.0.0:9000"),
            ("AUDITOR_FINAL_MODEL", "claude-opus-4-20250514"),
            ("AUDITOR_DRAFT_MODEL", "  "),
        ]))
        .unwrap();

        assert_eq!(config.backend, AgentBackend::Anthropic);
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.final_model.as_deref(), Some("claude-opus-4-20250514"));
        assert!(config.draft_model.is_none());
    }

    #[test]
    fn test_bad_backend() {
        assert!(ServerConfig::from_lookup(lookup(&[("AGENT_BACKEND", "gemini")])).is_err());
    }

    #[tokio::test]
    async fn test_pipeline_config_applies_models() {
        let config =
            ServerConfig::from_lookup(lookup(&[("AUDITOR_AUDIT_MODEL", "gpt-4.1")])).unwrap();
        let pipeline = config.pipeline_config().await.unwrap();

        assert_eq!(pipeline.stages.draft.model, "gpt-4o-mini");
        assert_eq!(pipeline.stages.audit.model, "gpt-4.1");
        assert_eq!(pipeline.policy, PromptPolicy::default());
    }
}
