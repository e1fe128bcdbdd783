// Common DTOs and error mapping for the HTTP API

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hostbench_workloads::WorkloadError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Failures surfaced by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The workload itself failed
    #[error(transparent)]
    Workload(#[from] WorkloadError),

    /// The request body cannot be turned into a payload
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The blocking worker running the workload panicked or was cancelled
    #[error("workload worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Workload(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "workload request failed");
        } else {
            tracing::warn!(error = %self, "workload request rejected");
        }
        ErrorResponse::new(self.to_string())
            .into_response(status)
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::InvalidBody("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(WorkloadError::size_overflow("sizeInMB", u64::MAX)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_workload_message_is_transparent() {
        let err = ApiError::from(WorkloadError::TaskJoin("task 3 panicked".into()));
        assert_eq!(err.to_string(), "task failed to complete: task 3 panicked");
    }
}
