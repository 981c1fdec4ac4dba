//! Shared application state.

use std::sync::Arc;

use compliance_agentic::ReflectivePipeline;

/// Built once in `main`, read-only for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReflectivePipeline>,
}

impl AppState {
    pub fn new(pipeline: ReflectivePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
