//! Compliance Report Model
//!
//! Output types of the reflective pipeline and the JSON Schema the Finalizer
//! stage binds the model to.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::llm_client::ResponseSchema;

/// Fixed disclaimer carried in every final report summary.
pub const DISCLAIMER: &str = "AI-generated, for human review only.";

/// Phrase that marks a summary as already disclaimed, however the model worded it.
const DISCLAIMER_MARKER: &str = "for human review only";

/// Severity tier assigned per risk item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One identified risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    pub description: String,
    pub severity: Severity,
}

/// Structured report produced by the Finalizer stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub summary: String,
    pub key_risks: Vec<RiskItem>,
    pub obligations: Vec<String>,
    pub recommended_actions: Vec<String>,
    pub missing_info: String,
}

impl ComplianceReport {
    /// Strict JSON Schema for structured output: every field required, no extras.
    pub fn response_schema() -> ResponseSchema {
        let severities: Vec<&str> = Severity::ALL.iter().map(Severity::as_str).collect();

        ResponseSchema {
            name: "compliance_report".to_string(),
            description: "Structured compliance risk report reconciling the original document, \
                          the draft summary and the audit critique"
                .to_string(),
            schema: json!({
                "type": "object",
                "properties": {
                    "summary": {"type": "string"},
                    "key_risks": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "description": {"type": "string"},
                                "severity": {"type": "string", "enum": severities}
                            },
                            "required": ["description", "severity"],
                            "additionalProperties": false
                        }
                    },
                    "obligations": {"type": "array", "items": {"type": "string"}},
                    "recommended_actions": {"type": "array", "items": {"type": "string"}},
                    "missing_info": {"type": "string"}
                },
                "required": ["summary", "key_risks", "obligations", "recommended_actions", "missing_info"],
                "additionalProperties": false
            }),
        }
    }

    /// Append the disclaimer to the summary unless the model already included it.
    pub fn ensure_disclaimer(&mut self) {
        if self.summary.to_lowercase().contains(DISCLAIMER_MARKER) {
            return;
        }
        let trimmed = self.summary.trim_end();
        self.summary = if trimmed.is_empty() {
            DISCLAIMER.to_string()
        } else {
            format!("{trimmed}\n\n{DISCLAIMER}")
        };
    }

    /// Highest severity among the key risks, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.key_risks.iter().map(|r| r.severity).max()
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub draft: String,
    pub critique: String,
    #[serde(rename = "final")]
    pub final_report: ComplianceReport,
}
