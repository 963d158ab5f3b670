//! Error types for the LSB codec.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, StegoError>;

/// Errors that can occur while embedding or extracting a message.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The payload needs more bit slots than the carrier has.
    #[error("Message is too long for this image: need {required} bits, have {available} bits")]
    Capacity { required: usize, available: usize },

    /// No sentinel anywhere in the image.
    #[error("No hidden message found")]
    NotFound,

    /// Carrier has zero pixels.
    #[error("Image has no pixels")]
    EmptyImage,

    /// Carrier has fewer than three samples per pixel.
    #[error("Unsupported image: {0} channel(s) per pixel, need at least 3")]
    UnsupportedChannels(u8),

    /// A message character does not fit in a single byte.
    #[error("Character {ch:?} at position {index} does not fit in a single byte")]
    NonByteCharacter { ch: char, index: usize },

    /// Container decode/encode failure in the byte and file helpers.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl StegoError {
    /// Input rejected as malformed rather than a capacity or absence outcome.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            StegoError::EmptyImage
                | StegoError::UnsupportedChannels(_)
                | StegoError::NonByteCharacter { .. }
        )
    }
}
