//! Prompt Policy
//!
//! The three system instructions are policy, not logic. They ship with
//! built-in defaults and can be replaced from a YAML file without a rebuild:
//!
//! ```yaml
//! scope_guard: |
//!   You are a strict FinTech Compliance Assistant. ...
//! audit_checklist: |
//!   You are a Senior Compliance Auditor. ...
//! precision_rules: |
//!   ## ROLE ...
//! ```
//!
//! Omitted keys keep their default text.

use std::path::Path;

use serde::Deserialize;

use crate::backend::AgentBackend;
use crate::error::ConfigError;
use crate::llm_client::GenerationParams;

/// Exact refusal the Drafter emits for non-compliance input.
pub const OUT_OF_SCOPE_SENTINEL: &str =
    "OUT OF SCOPE: This content does not contain regulatory or compliance data.";

/// Low randomness for every stage
const STAGE_TEMPERATURE: f32 = 0.1;

/// Output cap for the two plain-text stages
const TEXT_STAGE_MAX_TOKENS: u32 = 300;

/// System instructions for the three stages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PromptPolicy {
    /// Drafter instruction; must tell the model to answer off-topic input with the sentinel
    pub scope_guard: String,
    /// Auditor instruction; the multiplier / deadline / conflict checklist
    pub audit_checklist: String,
    /// Finalizer instruction; precision rules, severity table, disclaimer
    pub precision_rules: String,
}

impl Default for PromptPolicy {
    fn default() -> Self {
        Self {
            scope_guard: default_scope_guard(),
            audit_checklist: default_audit_checklist(),
            precision_rules: default_precision_rules(),
        }
    }
}

impl PromptPolicy {
    /// Parse a policy document, falling back to defaults for omitted keys.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let policy: PromptPolicy = serde_yaml::from_str(yaml)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy document from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_yaml_str(&yaml)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, text) in [
            ("scope_guard", &self.scope_guard),
            ("audit_checklist", &self.audit_checklist),
            ("precision_rules", &self.precision_rules),
        ] {
            if text.trim().is_empty() {
                return Err(ConfigError::EmptyField(name));
            }
        }
        Ok(())
    }
}

fn default_scope_guard() -> String {
    format!(
        "You are a strict FinTech Compliance Assistant. \
         SCOPE GUARD: Only summarize documents related to financial regulations, KYC/AML, or legal compliance. \
         If the input is general knowledge (like geography or history) or unrelated to compliance, \
         do NOT answer the question. Instead, strictly state: '{OUT_OF_SCOPE_SENTINEL}'"
    )
}

fn default_audit_checklist() -> String {
    "You are a Senior Compliance Auditor. Compare the DRAFT against the ORIGINAL text. \
     Your job is to find 'hidden' multipliers that the draft missed. \
     Specifically check for: \
     1. Multipliers: Is the fine 'per account', 'per day', or 'per violation'? \
     2. Deadlines: Are there specific timezones or 'business days' vs 'calendar days'? \
     3. Conflict: Does this rule override a specific previous year's rule? \
     If the draft missed any of these, state it clearly in your critique."
        .to_string()
}

fn default_precision_rules() -> String {
    r#"## ROLE
You are a Senior Compliance Officer. Produce a high-precision structured report.

## PRECISION RULES (MANDATORY)
- You MUST include specific dollar amounts and multipliers (e.g., 'per account', 'per day').
- NEVER generalize these into 'hefty fines'. Use the exact numbers from the ORIGINAL text.
- If the Critique identifies a missed multiplier, you MUST restore it from the ORIGINAL text.

## SEVERITY SCORING
For every item in 'key_risks', assign a severity level based on these criteria:
- **Critical**: Multipliers involved (per account, per day, per violation) or potential business shutdown.
- **High**: Large flat fines (>$10,000) or direct legal action/lawsuits.
- **Medium**: Operational changes required or minor flat fines.
- **Low**: Simple documentation updates or non-urgent notices.

## FORMAT
Output the final report in the requested JSON structure.
Safety Disclaimer: end the summary with "AI-generated, for human review only.""#
        .to_string()
}

/// Generation settings for each stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSettings {
    pub draft: GenerationParams,
    pub audit: GenerationParams,
    pub finalize: GenerationParams,
}

impl StageSettings {
    /// Defaults per provider: a small fast model drafts, the larger model audits and finalizes.
    pub fn for_backend(backend: AgentBackend) -> Self {
        let (draft_model, review_model) = match backend {
            AgentBackend::OpenAi => ("gpt-4o-mini", "gpt-4o"),
            AgentBackend::Anthropic => ("claude-3-5-haiku-latest", "claude-sonnet-4-20250514"),
        };

        Self {
            draft: GenerationParams::new(
                draft_model,
                STAGE_TEMPERATURE,
                Some(TEXT_STAGE_MAX_TOKENS),
            ),
            audit: GenerationParams::new(
                review_model,
                STAGE_TEMPERATURE,
                Some(TEXT_STAGE_MAX_TOKENS),
            ),
            finalize: GenerationParams::new(review_model, STAGE_TEMPERATURE, None),
        }
    }

    /// Replace stage models where an override is given.
    pub fn with_models(
        mut self,
        draft: Option<String>,
        audit: Option<String>,
        finalize: Option<String>,
    ) -> Self {
        if let Some(model) = draft {
            self.draft.model = model;
        }
        if let Some(model) = audit {
            self.audit.model = model;
        }
        if let Some(model) = finalize {
            self.finalize.model = model;
        }
        self
    }
}

impl Default for StageSettings {
    fn default() -> Self {
        Self::for_backend(AgentBackend::default())
    }
}

/// Everything a pipeline needs besides the client. Read-only after startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub policy: PromptPolicy,
    pub stages: StageSettings,
}
