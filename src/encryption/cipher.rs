//! AES-256-GCM text cipher for the `/encrypt/text` and `/decrypt/text` endpoints.
//!
//! Keys and tokens are URL-safe base64 so they survive JSON, query strings
//! and environment variables unchanged.
//!
//! Token layout (before base64): nonce (12 bytes) || ciphertext || tag (16 bytes)

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::RngCore;
use thiserror::Error;

/// Key size for AES-256 (256 bits).
pub const KEY_SIZE: usize = 32;

/// Nonce size for AES-GCM (96 bits).
const NONCE_SIZE: usize = 12;

/// Authentication tag size (128 bits).
const TAG_SIZE: usize = 16;

#[derive(Error, Debug)]
pub enum CipherError {
    /// Configured key is not base64 or not 32 bytes long.
    #[error("Invalid cipher key: {0}")]
    InvalidKey(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Wrong key, tampered or malformed token, or non-UTF-8 plaintext.
    #[error("Decryption failed: invalid token or wrong key")]
    Decryption,
}

/// Symmetric cipher built from explicitly supplied key material.
#[derive(Clone)]
pub struct TextCipher {
    cipher: Aes256Gcm,
    key: [u8; KEY_SIZE],
}

impl TextCipher {
    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
        Self { cipher, key }
    }

    /// Build a cipher from a URL-safe base64 key string.
    pub fn from_key_str(encoded: &str) -> Result<Self, CipherError> {
        let bytes = URL_SAFE
            .decode(encoded.trim())
            .map_err(|e| CipherError::InvalidKey(e.to_string()))?;

        let key: [u8; KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
            CipherError::InvalidKey(format!(
                "expected {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;

        Ok(Self::new(key))
    }

    /// Build a cipher around a fresh random key.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut key);
        Self::new(key)
    }

    /// The key as URL-safe base64, accepted by [`TextCipher::from_key_str`].
    pub fn key_string(&self) -> String {
        URL_SAFE.encode(self.key)
    }

    /// Encrypt `plaintext` into a URL-safe base64 token.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| CipherError::Encryption(e.to_string()))?;

        let mut token = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&ciphertext);

        Ok(URL_SAFE.encode(token))
    }

    /// Decrypt a token produced by [`TextCipher::encrypt`].
    pub fn decrypt(&self, token: &str) -> Result<String, CipherError> {
        let raw = URL_SAFE
            .decode(token.trim())
            .map_err(|_| CipherError::Decryption)?;

        if raw.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CipherError::Decryption);
        }

        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CipherError::Decryption)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::Decryption)
    }
}

impl std::fmt::Debug for TextCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextCipher").finish_non_exhaustive()
    }
}
