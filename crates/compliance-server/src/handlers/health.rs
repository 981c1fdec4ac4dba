//! GET /health — liveness plus the configured provider and stage models.

use axum::{extract::State, Json};

use crate::dto::{HealthResponse, StageModels};
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let stages = &state.pipeline.config().stages;
    Json(HealthResponse {
        status: "ok".to_string(),
        provider: state.pipeline.provider_name().to_string(),
        models: StageModels {
            draft: stages.draft.model.clone(),
            audit: stages.audit.model.clone(),
            finalize: stages.finalize.model.clone(),
        },
    })
}
