//! Response envelope shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Outcome carried in the `status` field of every envelope.
///
/// `Fail` is a client input problem (400/404), `Error` an unexpected
/// server-side failure (500).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
    Error,
}

/// `{status, message?, data?}` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    /// Success envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Failure envelope (`fail` or `error`) carrying only a message.
    pub fn failure(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// An envelope paired with the HTTP status code it is sent with.
#[derive(Debug)]
pub struct Reply<T> {
    pub code: StatusCode,
    pub envelope: Envelope<T>,
}

impl<T> Reply<T> {
    pub fn ok(envelope: Envelope<T>) -> Self {
        Self {
            code: StatusCode::OK,
            envelope,
        }
    }

    pub fn created(envelope: Envelope<T>) -> Self {
        Self {
            code: StatusCode::CREATED,
            envelope,
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self.envelope)).into_response()
    }
}
