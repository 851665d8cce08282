//! Request extractors whose rejections use the response envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor; malformed bodies become a 400 `fail` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Payload<T>(pub T);
