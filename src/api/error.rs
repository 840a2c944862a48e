use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::error_response;

/// Failure of a calculator request. Everything except `Internal` is the
/// caller's to fix and maps to 400.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    MissingField(String),

    #[error("{0}")]
    OutOfRange(String),

    #[error("{0}")]
    Malformed(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn missing(msg: &str) -> Self {
        Self::MissingField(msg.to_string())
    }

    pub fn out_of_range(msg: &str) -> Self {
        Self::OutOfRange(msg.to_string())
    }

    pub fn malformed(msg: &str) -> Self {
        Self::Malformed(msg.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::OutOfRange(_) | Self::Malformed(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(format!("Invalid JSON payload: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(detail) => tracing::error!(%detail, "calculation failed"),
            other => tracing::debug!(error = %other, "rejected calculator request"),
        }
        error_response(self.status(), &self.to_string())
    }
}
