//! Reflective LLM pipeline for compliance documents
//!
//! Turns raw regulatory text into a typed risk report by chaining three model
//! calls. It has no HTTP server dependencies - the REST surface lives in
//! `compliance-server`.
//!
//! ## Architecture
//!
//! ```text
//! Document → Drafter (scope guard) → Auditor (critique) → Finalizer (schema-bound) → ComplianceReport
//! ```
//!
//! ## Backend Selection
//!
//! Set `AGENT_BACKEND` environment variable:
//! - `openai` (default): OpenAI API
//! - `anthropic`: Anthropic Claude API

// LLM client abstraction
pub mod anthropic_client;
pub mod backend;
pub mod client_factory;
pub mod llm_client;
#[cfg(any(test, feature = "test-support"))]
pub mod mock_client;
pub mod openai_client;

// Pipeline
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod report;

// Re-exports for convenience
pub use backend::AgentBackend;
pub use client_factory::{create_llm_client, create_llm_client_with_key};
pub use error::{ConfigError, PipelineError, SchemaError, StructuredError};
pub use llm_client::{generate_structured, GenerationParams, LlmClient, ResponseSchema};
pub use pipeline::{PipelineStage, ReflectivePipeline};
pub use policy::{PipelineConfig, PromptPolicy, StageSettings, OUT_OF_SCOPE_SENTINEL};
pub use report::{ComplianceReport, PipelineResult, RiskItem, Severity, DISCLAIMER};
