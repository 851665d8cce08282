//! Error handling for the bookshelf HTTP layer

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::{NoContext, Timestamp, Uuid};

use crate::response::{Envelope, Status};

const HIDDEN_INTERNAL_MESSAGE: &str = "An internal server error occurred";

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    /// Server-side failure whose message is meant for the client.
    #[error("internal error: {message}")]
    Internal { message: String, code: String },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create an internal error with a client-facing message
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            code: "internal_error".to_string(),
        }
    }

    /// Override the machine-readable code used in logs
    pub fn with_code(mut self, new_code: impl Into<String>) -> Self {
        match &mut self {
            AppError::BadRequest { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Internal { code, .. } => *code = new_code.into(),
            AppError::Unexpected(_) => {}
        }
        self
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } | AppError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text()).with_code("invalid_payload")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v7(Timestamp::now(NoContext));
        let status = self.status_code();

        let (envelope_status, error_code, message) = match self {
            AppError::BadRequest { message, code } | AppError::NotFound { message, code } => {
                (Status::Fail, code, message)
            }
            AppError::Internal { message, code } => (Status::Error, code, message),
            AppError::Unexpected(e) => {
                tracing::error!(error_id = %error_id, error = ?e, "unexpected error");

                // Hide internal details outside of debug builds
                let message = if cfg!(debug_assertions) {
                    e.to_string()
                } else {
                    HIDDEN_INTERNAL_MESSAGE.to_string()
                };
                (Status::Error, "unexpected_error".to_string(), message)
            }
        };

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                "Request error"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                "Request failed"
            );
        }

        (status, Json(Envelope::failure(envelope_status, message))).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
