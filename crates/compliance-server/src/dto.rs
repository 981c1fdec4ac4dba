//! Request/response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

/// POST /summarize body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocRequest {
    pub text: String,
}

/// Every error response has this shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageModels {
    pub draft: String,
    pub audit: String,
    pub finalize: String,
}

/// GET /health body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub models: StageModels,
}
