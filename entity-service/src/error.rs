//! Errors surfaced to HTTP callers.
//!
//! Each variant maps to one status code and one envelope shape. Client-side
//! failures carry a fixed message only; storage failures also carry the
//! underlying error text in `error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;
use thiserror::Error;

use crate::dtos::{StatusMessage, StatusMessageError, STATUS_ERROR};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, forged or expired credential.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid entity ID")]
    InvalidEntityId,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: AppError,
    },

    /// A sibling service is not configured or did not answer.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn storage(message: &'static str, source: AppError) -> Self {
        Self::Storage { message, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidEntityId | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } | ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Storage { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (
                    status,
                    Json(StatusMessageError {
                        status: STATUS_ERROR.to_string(),
                        message: message.to_string(),
                        error: source.to_string(),
                    }),
                )
                    .into_response()
            }
            other => (status, Json(StatusMessage::error(other.to_string()))).into_response(),
        }
    }
}
