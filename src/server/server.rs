//! # Server Core - Steganography Service
//!
//! The core server component does the actual work behind each endpoint:
//! embedding and extracting text with the LSB codec, and running the text
//! cipher. HTTP concerns (multipart parsing, CORS, status codes) live in
//! [`routes`](super::routes).

use log::info;
use uuid::Uuid;

use super::error::ApiError;
use crate::encryption::TextCipher;
use crate::processing::steganography;

/// Core server component shared by all request handlers.
pub struct ServerCore {
    cipher: TextCipher,
}

impl ServerCore {
    /// Create a new server core around explicitly supplied cipher key material.
    pub fn new(cipher: TextCipher) -> Self {
        Self { cipher }
    }

    /// Embed `message` into an uploaded image and return PNG bytes.
    ///
    /// # Arguments
    /// - `request_id`: Identifier used only for logging
    /// - `image_data`: Raw bytes of the input image (any format the `image` crate reads)
    /// - `message`: Text to hide; characters must be U+00FF or below
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)`: Encoded image bytes (PNG format)
    /// - `Err`: Image too small, unreadable, or message not single-byte
    pub async fn encode_image(
        &self,
        request_id: Uuid,
        image_data: Vec<u8>,
        message: String,
    ) -> Result<Vec<u8>, ApiError> {
        info!(
            "📷 Request {} embedding {} chars into {} byte image",
            request_id,
            message.chars().count(),
            image_data.len()
        );

        // The codec is CPU-bound; keep it off the async worker threads.
        let encoded = tokio::task::spawn_blocking(move || {
            steganography::embed_text_bytes(&image_data, &message)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Encoding task panicked: {}", e)))??;

        info!(
            "✅ Request {} produced {} byte PNG",
            request_id,
            encoded.len()
        );

        Ok(encoded)
    }

    /// Extract the hidden message from an uploaded image.
    pub async fn decode_image(
        &self,
        request_id: Uuid,
        image_data: Vec<u8>,
    ) -> Result<String, ApiError> {
        info!(
            "🔍 Request {} scanning {} byte image",
            request_id,
            image_data.len()
        );

        let message = tokio::task::spawn_blocking(move || {
            steganography::extract_text_bytes(&image_data)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Decoding task panicked: {}", e)))??;

        info!(
            "✅ Request {} recovered {} chars",
            request_id,
            message.chars().count()
        );

        Ok(message)
    }

    pub fn encrypt_text(&self, text: &str) -> Result<String, ApiError> {
        Ok(self.cipher.encrypt(text)?)
    }

    pub fn decrypt_text(&self, token: &str) -> Result<String, ApiError> {
        Ok(self.cipher.decrypt(token)?)
    }
}
