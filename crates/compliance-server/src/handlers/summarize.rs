//! POST /summarize — run the three-pass pipeline over one document.

use axum::{extract::State, Json};
use compliance_agentic::PipelineResult;

use crate::dto::DocRequest;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn summarize(
    State(state): State<AppState>,
    Json(req): Json<DocRequest>,
) -> Result<Json<PipelineResult>, ApiError> {
    // Reject before any outbound call
    if req.text.trim().is_empty() {
        return Err(ApiError::EmptyInput);
    }

    let result = state.pipeline.run(&req.text).await?;
    Ok(Json(result))
}
