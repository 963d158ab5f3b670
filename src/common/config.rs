//! # Configuration Utilities
//!
//! TOML-backed configuration for the web server and the text cipher.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working local setup.
//!
//! # Example TOML
//!
//! ```toml
//! [server]
//! address = "0.0.0.0:5000"
//! max_upload_bytes = 52428800
//! allowed_origins = ["http://localhost:3000"]
//!
//! [cipher]
//! secret_key = "<32 bytes, URL-safe base64>"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

/// Environment variable that overrides `cipher.secret_key`.
pub const SECRET_KEY_ENV: &str = "STEGO_SECRET_KEY";

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: AppConfig = load_config("config/server.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Complete backend configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub cipher: CipherSettings,
}

/// HTTP listener and request policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to bind (e.g., "127.0.0.1:5000")
    pub address: String,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:5000".to_string(),
            max_upload_bytes: 50 * 1024 * 1024,
            allowed_origins: vec![
                "https://ronitraj07.github.io".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

/// Key material for the text cipher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherSettings {
    /// URL-safe base64 encoding of a 32-byte key. When absent, the server
    /// generates a temporary key at startup.
    pub secret_key: Option<String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        load_config(path)
    }

    /// Apply environment overrides (currently only [`SECRET_KEY_ENV`]).
    pub fn apply_env(&mut self) {
        self.apply_secret_key(std::env::var(SECRET_KEY_ENV).ok());
    }

    fn apply_secret_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.cipher.secret_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.address, "127.0.0.1:5000");
        assert_eq!(config.server.max_upload_bytes, 52_428_800);
        assert_eq!(config.server.allowed_origins.len(), 2);
        assert_eq!(config.cipher.secret_key, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\naddress = \"0.0.0.0:8080\"").unwrap();

        let config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.address, "0.0.0.0:8080");
        assert_eq!(config.server.max_upload_bytes, 52_428_800);
        assert_eq!(config.cipher, CipherSettings::default());
    }

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
address = "127.0.0.1:9000"
max_upload_bytes = 1024
allowed_origins = ["https://example.org"]

[cipher]
secret_key = "abc"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.max_upload_bytes, 1024);
        assert_eq!(config.server.allowed_origins, vec!["https://example.org"]);
        assert_eq!(config.cipher.secret_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(AppConfig::from_file("/nonexistent/stego.toml").is_err());
    }

    #[test]
    fn test_secret_key_override() {
        let mut config = AppConfig::default();
        config.apply_secret_key(None);
        assert_eq!(config.cipher.secret_key, None);

        config.apply_secret_key(Some("  ".to_string()));
        assert_eq!(config.cipher.secret_key, None);

        config.apply_secret_key(Some("from-env".to_string()));
        assert_eq!(config.cipher.secret_key.as_deref(), Some("from-env"));
    }
}
