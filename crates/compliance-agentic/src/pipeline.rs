//! Reflective Pipeline
//!
//! Three dependent passes over one document:
//!
//! ```text
//! text → Drafter → draft → Auditor → critique → Finalizer → ComplianceReport
//! ```
//!
//! Each pass consumes the previous pass's text. A failure at any pass aborts
//! the run and discards whatever earlier passes produced. Nothing is retried.

use std::sync::Arc;

use crate::error::PipelineError;
use crate::llm_client::{generate_structured, LlmClient};
use crate::policy::PipelineConfig;
use crate::report::{ComplianceReport, PipelineResult};

/// Where a run is; also identifies the failing pass in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Drafting,
    Auditing,
    Finalizing,
}

impl PipelineStage {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::Drafting => "drafting",
            PipelineStage::Auditing => "auditing",
            PipelineStage::Finalizing => "finalizing",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Draft → critique → final report orchestrator.
///
/// Holds only read-only collaborators, so one instance is shared by every request.
pub struct ReflectivePipeline {
    client: Arc<dyn LlmClient>,
    config: Arc<PipelineConfig>,
}

impl ReflectivePipeline {
    pub fn new(client: Arc<dyn LlmClient>, config: PipelineConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Run all three passes over `text`.
    ///
    /// Blank input is rejected before any call is made.
    pub async fn run(&self, text: &str) -> Result<PipelineResult, PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        tracing::info!(
            provider = self.client.provider_name(),
            chars = text.len(),
            "Step 1: drafting initial compliance summary"
        );
        let draft = self.draft(text).await?;

        tracing::info!("Step 2: performing audit pass");
        let critique = self.audit(text, &draft).await?;

        tracing::info!("Step 3: finalizing structured report");
        let final_report = self.finalize(text, &draft, &critique).await?;

        tracing::info!(
            risks = final_report.key_risks.len(),
            max_severity = ?final_report.max_severity(),
            "Pipeline complete"
        );

        Ok(PipelineResult {
            draft,
            critique,
            final_report,
        })
    }

    async fn draft(&self, text: &str) -> Result<String, PipelineError> {
        self.client
            .chat(&self.config.policy.scope_guard, text, &self.config.stages.draft)
            .await
            .map_err(|source| PipelineError::Upstream {
                stage: PipelineStage::Drafting,
                source,
            })
    }

    async fn audit(&self, text: &str, draft: &str) -> Result<String, PipelineError> {
        let user_prompt = audit_prompt(text, draft);
        self.client
            .chat(
                &self.config.policy.audit_checklist,
                &user_prompt,
                &self.config.stages.audit,
            )
            .await
            .map_err(|source| PipelineError::Upstream {
                stage: PipelineStage::Auditing,
                source,
            })
    }

    async fn finalize(
        &self,
        text: &str,
        draft: &str,
        critique: &str,
    ) -> Result<ComplianceReport, PipelineError> {
        let user_prompt = finalize_prompt(text, draft, critique);
        let schema = ComplianceReport::response_schema();

        let mut report: ComplianceReport = generate_structured(
            self.client.as_ref(),
            &self.config.policy.precision_rules,
            &user_prompt,
            &self.config.stages.finalize,
            &schema,
        )
        .await
        .map_err(|e| PipelineError::from_structured(PipelineStage::Finalizing, e))?;

        report.ensure_disclaimer();
        Ok(report)
    }
}

fn audit_prompt(text: &str, draft: &str) -> String {
    format!("ORIGINAL: {text}\n\nDRAFT: {draft}")
}

fn finalize_prompt(text: &str, draft: &str, critique: &str) -> String {
    format!("ORIGINAL TEXT: {text}\n\nDRAFT: {draft}\n\nCRITIQUE: {critique}")
}
