//! # Image Processing and Steganography
//!
//! This module hides text in images using LSB (Least Significant Bit)
//! steganography.
//!
//! ## Modules
//!
//! - [`bitstream`]: message bytes ↔ bits, plus the end-of-message sentinel
//! - [`traversal`]: the order in which channel samples are visited
//! - [`steganography`]: the encoder/decoder and image container helpers
//! - [`error`]: codec error types

pub mod bitstream;
pub mod error;
pub mod steganography;
pub mod traversal;

// Re-export main functions for convenience
pub use error::StegoError;
pub use steganography::{
    decode, decode_bytes, embed_text_bytes, encode, encode_bytes, extract_text_bytes,
};
