//! # API Message Types
//!
//! JSON bodies exchanged with the web frontend. Every failure is reported as
//! [`ErrorResponse`], i.e. `{"error": "..."}`.

use serde::{Deserialize, Serialize};

/// Body of `POST /encrypt/text`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncryptRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response of `POST /encrypt/text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    pub encrypted: String,
}

/// Body of `POST /decrypt/text`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecryptRequest {
    #[serde(default)]
    pub encrypted: Option<String>,
}

/// Response of `POST /decrypt/text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    pub decrypted: String,
}

/// Response of `POST /decode/image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
