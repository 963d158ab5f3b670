//! # Text Encryption
//!
//! Symmetric encryption for the plain-text API endpoints. This is separate
//! from the image codec: embedded bits are never encrypted.

pub mod cipher;

pub use cipher::{CipherError, TextCipher};
