//! # LSB Steganography Implementation
//!
//! Implements text embedding and extraction using Least Significant Bit (LSB) steganography.
//!
//! ## Algorithm
//!
//! The LSB steganography technique hides text within an image by modifying the least
//! significant bit of each color channel (R, G, B) in the image pixels.
//!
//! ### Encoding Process
//! 1. Map each message character to one byte (code points 0-255 only)
//! 2. Expand the bytes to bits and append the 16-bit sentinel
//!    (see [`bitstream`](super::bitstream))
//! 3. Reject the message if the bits exceed `width * height * 3`
//! 4. Copy the image and, walking R → G → B → next pixel, replace each
//!    channel's LSB with the next bit until the bits run out
//!
//! ### Decoding Process
//! 1. Walk the same slots, reading each LSB
//! 2. Stop at the first sentinel and pack the preceding bits into bytes
//! 3. Report [`StegoError::NotFound`] if the image ends first
//!
//! ### Capacity
//! An image can store `(width * height * 3 - 16) / 8` characters.
//!
//! Example: An 800x600 image can store 179,998 characters.

use image::{DynamicImage, ImageBuffer, ImageFormat, Pixel};
use log::debug;
use std::io::Cursor;
use std::path::Path;

use super::bitstream::{self, SentinelScanner, SENTINEL_BITS};
use super::error::{Result, StegoError};
use super::traversal::{self, ChannelSlots, CARRIER_CHANNELS};

/// An 8-bit image held in one contiguous row-major sample buffer.
pub type Carrier<P> = ImageBuffer<P, Vec<u8>>;

/// Hide `message` in a copy of `image`.
///
/// Every character must be in the range U+0000..=U+00FF; each one is stored
/// as a single byte. The input image is never modified.
///
/// # Errors
/// - [`StegoError::Capacity`] if the message does not fit
/// - [`StegoError::NonByteCharacter`] for characters above U+00FF
/// - [`StegoError::EmptyImage`] / [`StegoError::UnsupportedChannels`] for unusable carriers
///
/// # Example
/// ```ignore
/// let carrier = image::RgbImage::new(10, 10);
/// let encoded = encode(&carrier, "Hi")?;
/// assert_eq!(decode(&encoded)?, "Hi");
/// ```
pub fn encode<P>(image: &Carrier<P>, message: &str) -> Result<Carrier<P>>
where
    P: Pixel<Subpixel = u8>,
{
    let payload = message_to_bytes(message)?;
    encode_bytes(image, &payload)
}

/// Hide raw `payload` bytes in a copy of `image`.
pub fn encode_bytes<P>(image: &Carrier<P>, payload: &[u8]) -> Result<Carrier<P>>
where
    P: Pixel<Subpixel = u8>,
{
    check_carrier(image)?;
    let (width, height) = image.dimensions();

    let bits = bitstream::encode_bits(payload);
    let available = traversal::capacity(width, height);

    if bits.len() > available {
        return Err(StegoError::Capacity {
            required: bits.len(),
            available,
        });
    }

    let mut encoded = image.clone();
    let samples: &mut [u8] = &mut encoded;

    // Zip stops as soon as the bits run out; later samples keep their value.
    for (index, &bit) in ChannelSlots::new(width, height, stride::<P>()).zip(&bits) {
        samples[index] = (samples[index] & !1) | bit;
    }

    debug!(
        "Embedded {} bytes ({} of {} bit slots) into {}x{} image",
        payload.len(),
        bits.len(),
        available,
        width,
        height
    );

    Ok(encoded)
}

/// Recover the message hidden in `image`.
///
/// Each recovered byte becomes the character with the same code point.
/// An empty message is returned as `Ok(String::new())`; absence of a
/// message is [`StegoError::NotFound`].
pub fn decode<P>(image: &Carrier<P>) -> Result<String>
where
    P: Pixel<Subpixel = u8>,
{
    decode_bytes(image).map(|bytes| bytes_to_message(&bytes))
}

/// Recover the raw payload bytes hidden in `image`.
pub fn decode_bytes<P>(image: &Carrier<P>) -> Result<Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    check_carrier(image)?;
    let (width, height) = image.dimensions();
    let samples = image.as_raw();

    let mut bits = Vec::new();
    let mut scanner = SentinelScanner::new();

    for index in ChannelSlots::new(width, height, stride::<P>()) {
        let bit = samples[index] & 1;
        bits.push(bit);

        if scanner.push(bit) {
            let payload = bitstream::pack_bytes(&bits[..bits.len() - SENTINEL_BITS]);
            debug!(
                "Found sentinel after {} bit slots, recovered {} bytes",
                bits.len(),
                payload.len()
            );
            return Ok(payload);
        }
    }

    debug!("Scanned {} bit slots without finding a sentinel", bits.len());
    Err(StegoError::NotFound)
}

/// Map each character to one byte, rejecting anything above U+00FF.
pub fn message_to_bytes(message: &str) -> Result<Vec<u8>> {
    message
        .chars()
        .enumerate()
        .map(|(index, ch)| u8::try_from(ch).map_err(|_| StegoError::NonByteCharacter { ch, index }))
        .collect()
}

/// Map each byte to the character with the same code point.
pub fn bytes_to_message(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Maximum message length, in characters, for a `width` x `height` carrier.
pub fn capacity_bytes(width: u32, height: u32) -> usize {
    traversal::capacity(width, height).saturating_sub(SENTINEL_BITS) / 8
}

fn stride<P: Pixel>() -> usize {
    P::CHANNEL_COUNT as usize
}

fn check_carrier<P>(image: &Carrier<P>) -> Result<()>
where
    P: Pixel<Subpixel = u8>,
{
    if image.width() == 0 || image.height() == 0 {
        return Err(StegoError::EmptyImage);
    }
    if stride::<P>() < CARRIER_CHANNELS {
        return Err(StegoError::UnsupportedChannels(P::CHANNEL_COUNT));
    }
    Ok(())
}

// ============================================================================
// CONTAINER HELPERS
// ============================================================================

/// Embed `text` into an already-decoded image of any colour type.
///
/// Images with alpha are processed as RGBA8 (alpha untouched), everything
/// else as RGB8.
pub fn embed_dynamic(img: &DynamicImage, text: &str) -> Result<DynamicImage> {
    if img.color().has_alpha() {
        Ok(DynamicImage::ImageRgba8(encode(&img.to_rgba8(), text)?))
    } else {
        Ok(DynamicImage::ImageRgb8(encode(&img.to_rgb8(), text)?))
    }
}

/// Extract text from an already-decoded image of any colour type.
pub fn extract_dynamic(img: &DynamicImage) -> Result<String> {
    if img.color().has_alpha() {
        decode(&img.to_rgba8())
    } else {
        decode(&img.to_rgb8())
    }
}

/// Embed text into encoded image bytes.
///
/// # Arguments
/// - `image_bytes`: Raw bytes of the input image (any format supported by `image` crate)
/// - `text`: Text to embed; every character must be U+00FF or below
///
/// # Returns
/// - `Ok(Vec<u8>)`: PNG image bytes with embedded text
/// - `Err`: If the image can't be loaded, is too small, or PNG encoding fails
///
/// # Example
/// ```ignore
/// let image_data = std::fs::read("input.jpg")?;
/// let encoded = embed_text_bytes(&image_data, "Secret message")?;
/// std::fs::write("output.png", encoded)?;
/// ```
pub fn embed_text_bytes(image_bytes: &[u8], text: &str) -> Result<Vec<u8>> {
    let img = image::load_from_memory(image_bytes)?;
    let encoded = embed_dynamic(&img, text)?;

    // PNG keeps every sample exact; a lossy format would wipe the LSBs.
    let mut output_bytes = Vec::new();
    encoded.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;

    Ok(output_bytes)
}

/// Extract text from encoded image bytes.
///
/// # Example
/// ```ignore
/// let encoded_image = std::fs::read("encoded.png")?;
/// let secret_text = extract_text_bytes(&encoded_image)?;
/// println!("Extracted: {}", secret_text);
/// ```
pub fn extract_text_bytes(image_bytes: &[u8]) -> Result<String> {
    let img = image::load_from_memory(image_bytes)?;
    extract_dynamic(&img)
}

/// Embed text into the image at `image_path` and write a PNG to `output_path`.
///
/// The output is PNG regardless of the extension of `output_path`.
pub fn embed_text_file(
    image_path: impl AsRef<Path>,
    text: &str,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let img = image::open(image_path)?;
    let encoded = embed_dynamic(&img, text)?;
    encoded.save_with_format(output_path, ImageFormat::Png)?;
    Ok(())
}

/// Extract text from the image at `image_path`.
pub fn extract_text_file(image_path: impl AsRef<Path>) -> Result<String> {
    let img = image::open(image_path)?;
    extract_dynamic(&img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_hi_on_black_10x10() {
        let carrier = RgbImage::new(10, 10);
        let encoded = encode(&carrier, "Hi").unwrap();

        // 'H' 01001000, 'i' 01101001, then the sentinel. 01001001 would be 'I'.
        let expected = "01001000011010011111111111111110";
        let written: String = encoded
            .as_raw()
            .iter()
            .take(32)
            .map(|s| if s & 1 == 1 { '1' } else { '0' })
            .collect();
        assert_eq!(written, expected);
        assert!(encoded.as_raw()[32..].iter().all(|&s| s == 0));

        assert_eq!(decode(&encoded).unwrap(), "Hi");
    }

    #[test]
    fn test_one_pixel_rejects_any_message() {
        let carrier = RgbImage::from_pixel(1, 1, Rgb([10, 20, 30]));
        match encode(&carrier, "a") {
            Err(StegoError::Capacity {
                required,
                available,
            }) => {
                assert_eq!(required, 24);
                assert_eq!(available, 3);
            }
            other => panic!("expected capacity error, got {:?}", other),
        }
        assert_eq!(carrier.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_exact_fit() {
        // 36 slots: two characters need 32 bits, three need 40.
        let carrier = RgbImage::from_pixel(6, 2, Rgb([200, 201, 202]));
        assert_eq!(capacity_bytes(6, 2), 2);
        assert_eq!(decode(&encode(&carrier, "ok").unwrap()).unwrap(), "ok");
        assert!(matches!(
            encode(&carrier, "bad"),
            Err(StegoError::Capacity { required: 40, available: 36 })
        ));
    }

    #[test]
    fn test_empty_message_round_trip() {
        let carrier = RgbImage::from_pixel(4, 4, Rgb([7, 7, 7]));
        let encoded = encode(&carrier, "").unwrap();
        assert_eq!(decode(&encoded).unwrap(), "");
    }

    #[test]
    fn test_blank_image_has_no_message() {
        let carrier = RgbImage::new(20, 20);
        assert!(matches!(decode(&carrier), Err(StegoError::NotFound)));

        let white = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
        assert!(matches!(decode(&white), Err(StegoError::NotFound)));
    }

    #[test]
    fn test_rgba_alpha_untouched() {
        let carrier = RgbaImage::from_pixel(8, 8, Rgba([100, 150, 200, 77]));
        let encoded = encode(&carrier, "alpha").unwrap();

        assert!(encoded.pixels().all(|p| p[3] == 77));
        assert_eq!(decode(&encoded).unwrap(), "alpha");
    }

    #[test]
    fn test_only_lsb_changes() {
        let carrier = RgbImage::from_fn(16, 16, |x, y| {
            Rgb([(x * 13 + y) as u8, (y * 7 + 3) as u8, (x ^ y) as u8 | 0x80])
        });
        let encoded = encode(&carrier, "Least significant").unwrap();

        for (old, new) in carrier.as_raw().iter().zip(encoded.as_raw()) {
            assert_eq!(old & !1, new & !1);
        }
    }

    #[test]
    fn test_latin1_round_trip() {
        let carrier = RgbImage::new(32, 32);
        let message = "caf\u{e9} \u{ff}\u{0}end";
        assert_eq!(decode(&encode(&carrier, message).unwrap()).unwrap(), message);
    }

    #[test]
    fn test_rejects_multibyte_character() {
        let carrier = RgbImage::new(32, 32);
        match encode(&carrier, "ok \u{20ac}") {
            Err(StegoError::NonByteCharacter { ch, index }) => {
                assert_eq!(ch, '\u{20ac}');
                assert_eq!(index, 3);
            }
            other => panic!("expected non-byte character error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_image() {
        let carrier = RgbImage::new(0, 5);
        let err = encode(&carrier, "x").unwrap_err();
        assert!(matches!(err, StegoError::EmptyImage));
        assert!(err.is_malformed_input());
        assert!(matches!(decode(&carrier), Err(StegoError::EmptyImage)));
    }

    #[test]
    fn test_rejects_grayscale_buffer() {
        let carrier = GrayImage::new(10, 10);
        assert!(matches!(
            encode(&carrier, "x"),
            Err(StegoError::UnsupportedChannels(1))
        ));
    }

    #[test]
    fn test_sentinel_collision_is_truncated() {
        let carrier = RgbImage::new(10, 10);
        let encoded = encode(&carrier, "a\u{ff}\u{fe}b").unwrap();
        assert_eq!(decode(&encoded).unwrap(), "a");
    }

    #[test]
    fn test_png_bytes_round_trip() {
        let carrier = DynamicImage::ImageRgb8(RgbImage::from_pixel(12, 12, Rgb([90, 91, 92])));
        let mut png = Vec::new();
        carrier
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let encoded = embed_text_bytes(&png, "in memory").unwrap();
        assert_eq!(extract_text_bytes(&encoded).unwrap(), "in memory");
    }

    #[test]
    fn test_grayscale_source_is_promoted() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 10, image::Luma([128])));
        let encoded = embed_dynamic(&gray, "gray").unwrap();
        assert!(matches!(encoded, DynamicImage::ImageRgb8(_)));
        assert_eq!(extract_dynamic(&encoded).unwrap(), "gray");
    }

    #[test]
    fn test_garbage_bytes_are_image_error() {
        assert!(matches!(
            extract_text_bytes(b"not an image"),
            Err(StegoError::Image(_))
        ));
    }
}
