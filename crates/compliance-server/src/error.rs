//! HTTP error mapping.
//!
//! Status codes are set on the response itself; the body is always
//! `{"error": "..."}`. Upstream detail is logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use compliance_agentic::PipelineError;
use thiserror::Error;

use crate::dto::ErrorBody;

pub const EMPTY_INPUT_MESSAGE: &str = "Input text cannot be empty";

pub const UNAVAILABLE_MESSAGE: &str =
    "The AI Auditor is currently unavailable. Please check your API key or connection.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,

    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyInput => StatusCode::BAD_REQUEST,
            Self::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::EmptyInput => Self::EmptyInput,
            other => {
                tracing::error!(stage = ?other.stage(), "Server Error: {}", other);
                Self::Unavailable
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
