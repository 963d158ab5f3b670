//! Error type for the HTTP layer and its mapping onto status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use thiserror::Error;

use crate::common::messages::ErrorResponse;
use crate::encryption::CipherError;
use crate::processing::StegoError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or unreadable request fields.
    #[error("{0}")]
    BadRequest(String),

    /// Upload exceeded the configured body limit.
    #[error("{0}")]
    TooLarge(String),

    #[error(transparent)]
    Stego(#[from] StegoError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("{0}")]
    NotImplemented(&'static str),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::TooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            ApiError::Stego(StegoError::Capacity { .. }) => (
                StatusCode::BAD_REQUEST,
                "Message is too long for this image".to_string(),
            ),
            ApiError::Stego(StegoError::NotFound) => (
                StatusCode::BAD_REQUEST,
                "No hidden message found".to_string(),
            ),
            ApiError::Stego(e) if e.is_malformed_input() => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Stego(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {}", e),
            ),
            ApiError::Cipher(CipherError::Decryption) => (
                StatusCode::BAD_REQUEST,
                "Decryption failed. The text may be invalid or the key may have changed."
                    .to_string(),
            ),
            ApiError::Cipher(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {}", e),
            ),
            ApiError::NotImplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg.to_string()),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {}", msg),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!("❌ {}", self);
        } else {
            warn!("⚠️  {} ({})", message, status);
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
