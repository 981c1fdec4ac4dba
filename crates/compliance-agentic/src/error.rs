//! Error types for the reflective pipeline.

use thiserror::Error;

use crate::pipeline::PipelineStage;

/// Structured payload did not bind to the expected Rust type.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("payload does not match schema '{schema}': {source}")]
    Mismatch {
        schema: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a single structured-output call.
#[derive(Error, Debug)]
pub enum StructuredError {
    #[error("upstream call failed: {0}")]
    Upstream(anyhow::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Failure of a pipeline run. Any variant aborts the whole run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input text cannot be empty")]
    EmptyInput,

    #[error("{stage} stage failed: {source}")]
    Upstream {
        stage: PipelineStage,
        #[source]
        source: anyhow::Error,
    },

    #[error("{stage} stage returned an invalid report: {source}")]
    Schema {
        stage: PipelineStage,
        #[source]
        source: SchemaError,
    },
}

impl PipelineError {
    /// Stage the run was in when it failed, `None` for rejected input.
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::EmptyInput => None,
            Self::Upstream { stage, .. } | Self::Schema { stage, .. } => Some(*stage),
        }
    }

    pub(crate) fn from_structured(stage: PipelineStage, err: StructuredError) -> Self {
        match err {
            StructuredError::Upstream(source) => Self::Upstream { stage, source },
            StructuredError::Schema(source) => Self::Schema { stage, source },
        }
    }
}

/// Policy file could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read policy file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid policy YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("policy field '{0}' must not be empty")]
    EmptyField(&'static str),
}
