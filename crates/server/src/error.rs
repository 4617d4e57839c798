use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::BackendError;
use levels::LevelError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

/// JSON error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Backend(BackendError::Transport(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Backend(BackendError::UpstreamStatus { status, .. }) => StatusCode::from_u16(*status)
                .ok()
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Backend(BackendError::MalformedResponse { .. })
            | ApiError::Backend(BackendError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Level(LevelError::NotFound(_)) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Level(LevelError::DuplicateLevel(_)) => StatusCode::CONFLICT,
            ApiError::Level(LevelError::Invalid(_)) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            ApiError::Backend(BackendError::Transport(reason)) => {
                ("Failed to reach backend".to_string(), Some(reason.clone()))
            }
            ApiError::Backend(BackendError::UpstreamStatus { status, body }) => (
                format!("Backend responded with status {}", status),
                Some(body.clone()).filter(|body| !body.is_empty()),
            ),
            ApiError::Backend(BackendError::MalformedResponse { reason, excerpt }) => (
                "Malformed backend response".to_string(),
                Some(format!("{}; body: {}", reason, excerpt)),
            ),
            ApiError::Backend(BackendError::Config(e)) => {
                ("Internal server error".to_string(), Some(e.to_string()))
            }
            other => (other.to_string(), None),
        };
        ErrorBody { error, details }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        } else {
            warn!("Request rejected with {}: {}", status, self);
        }

        (status, Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
