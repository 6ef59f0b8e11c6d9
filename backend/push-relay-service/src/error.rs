/// Error types for Push Relay Service
///
/// Relay failures keep the coarse caller contract: HTTP 500 with plain text,
/// and the gateway body verbatim when FCM rejected the message.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use fcm_shared::FCMError;
use thiserror::Error;

use crate::models::ApiResponse;

/// Result type for push-relay-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed configuration; the instance cannot serve
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Failure anywhere in the token-exchange / send pipeline
    #[error(transparent)]
    Push(#[from] FCMError),

    /// Device-token directory lookup failed
    #[error("Token directory error: {0}")]
    Directory(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Push(FCMError::InvalidToken) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Config(_)
            | AppError::Push(_)
            | AppError::Directory(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Push(err) if status == StatusCode::INTERNAL_SERVER_ERROR => {
                HttpResponse::build(status)
                    .content_type("text/plain; charset=utf-8")
                    .body(err.caller_detail())
            }
            other => HttpResponse::build(status).json(ApiResponse::err(other.to_string())),
        }
    }
}
