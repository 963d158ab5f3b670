//! # Web Server
//!
//! - [`server`]: [`ServerCore`], the codec and cipher work behind each endpoint
//! - [`routes`]: axum router, handlers and request parsing
//! - [`error`]: [`ApiError`] and its status code mapping

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{router, AppState};
pub use server::ServerCore;

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::common::config::{AppConfig, CipherSettings, SECRET_KEY_ENV};
use crate::encryption::TextCipher;

/// Build the text cipher from configured key material.
///
/// Falls back to a temporary random key (with a warning) when none is set;
/// tokens produced with it stop decrypting after a restart.
pub fn cipher_from_settings(settings: &CipherSettings) -> Result<TextCipher> {
    match settings.secret_key.as_deref() {
        Some(key) => Ok(TextCipher::from_key_str(key)?),
        None => {
            warn!(
                "{} not set and no cipher.secret_key configured. Using a temporary key.",
                SECRET_KEY_ENV
            );
            Ok(TextCipher::generate())
        }
    }
}

/// Bind the configured address and serve until the process is stopped.
pub async fn run(config: AppConfig) -> Result<()> {
    let cipher = cipher_from_settings(&config.cipher)?;
    let state = Arc::new(AppState {
        core: ServerCore::new(cipher),
    });

    let app = router(state, &config.server);

    let listener = tokio::net::TcpListener::bind(&config.server.address).await?;
    info!(
        "🌐 Steganography backend running on http://{}",
        listener.local_addr()?
    );
    info!(
        "📦 Upload limit {} bytes, CORS origins {:?}",
        config.server.max_upload_bytes, config.server.allowed_origins
    );

    axum::serve(listener, app).await?;

    Ok(())
}
