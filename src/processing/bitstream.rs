//! # Bit-Stream Codec
//!
//! Converts between message bytes and the flat bit sequence that gets written
//! into pixel LSBs.
//!
//! ## Format
//!
//! ```text
//! [byte 0: 8 bits MSB-first][byte 1: 8 bits]...[sentinel: 1111111111111110]
//! ```
//!
//! Bits are stored one per `u8` (value `0` or `1`) so they can be OR-ed
//! straight into a cleared sample.
//!
//! ## Sentinel collision
//!
//! The sentinel is searched at every bit offset, not only on byte
//! boundaries, and the FIRST occurrence wins. A message whose own bits
//! contain `1111111111111110` (for example the byte pair `0xFF 0xFE`) is
//! therefore truncated on decode. Existing encoded images depend on this
//! exact scan, so it is kept as-is.

/// End-of-message marker appended after the payload bits.
pub const SENTINEL: u16 = 0b1111_1111_1111_1110;

/// Length of [`SENTINEL`] in bits.
pub const SENTINEL_BITS: usize = 16;

/// Number of bits needed to carry a message of `message_len` bytes.
pub fn required_bits(message_len: usize) -> usize {
    message_len * 8 + SENTINEL_BITS
}

/// Expand `message` into bits (MSB-first per byte) followed by the sentinel.
pub fn encode_bits(message: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(required_bits(message.len()));

    for &byte in message {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }

    for shift in (0..SENTINEL_BITS).rev() {
        bits.push(((SENTINEL >> shift) & 1) as u8);
    }

    bits
}

/// Recover the message bytes in front of the first sentinel.
///
/// Returns `None` when the sentinel never appears. A trailing partial byte
/// before the sentinel is dropped.
pub fn decode_bits(bits: &[u8]) -> Option<Vec<u8>> {
    let mut scanner = SentinelScanner::new();
    let end = bits.iter().position(|&bit| scanner.push(bit))?;
    let payload_len = end + 1 - SENTINEL_BITS;

    Some(pack_bytes(&bits[..payload_len]))
}

/// Group bits into bytes, MSB-first. Any trailing partial byte is ignored.
pub fn pack_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .collect()
}

/// Sliding 16-bit window that reports when the sentinel has just been read.
///
/// Lets the decoder stop reading pixels as soon as the first sentinel shows
/// up, which yields the same result as collecting every bit and scanning
/// afterwards.
#[derive(Debug, Default, Clone)]
pub struct SentinelScanner {
    window: u16,
    seen: usize,
}

impl SentinelScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one bit. Returns `true` when the last 16 bits equal the sentinel.
    pub fn push(&mut self, bit: u8) -> bool {
        self.window = (self.window << 1) | u16::from(bit & 1);
        self.seen += 1;
        self.seen >= SENTINEL_BITS && self.window == SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_from_str(s: &str) -> Vec<u8> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '1' { 1 } else { 0 })
            .collect()
    }

    #[test]
    fn test_encode_hi() {
        // 'H' = 0x48, 'i' = 0x69. The second byte is 01101001; 01001001 would be 'I'.
        let bits = encode_bits(b"Hi");
        assert_eq!(bits, bits_from_str("01001000 01101001 1111111111111110"));
        assert_eq!(bits.len(), required_bits(2));
    }

    #[test]
    fn test_encode_empty_is_just_sentinel() {
        assert_eq!(encode_bits(b""), bits_from_str("1111111111111110"));
    }

    #[test]
    fn test_decode_hi() {
        let bits = bits_from_str("01001000 01101001 1111111111111110 0101");
        assert_eq!(decode_bits(&bits), Some(b"Hi".to_vec()));
    }

    #[test]
    fn test_decode_empty_message() {
        assert_eq!(decode_bits(&encode_bits(b"")), Some(Vec::new()));
    }

    #[test]
    fn test_decode_without_sentinel() {
        let bits = bits_from_str("0100100001101001 111111111111111");
        assert_eq!(decode_bits(&bits), None);
        assert_eq!(decode_bits(&[]), None);
    }

    #[test]
    fn test_decode_drops_partial_byte() {
        // 8 payload bits + 3 stray bits, then the sentinel.
        let bits = bits_from_str("01000001 010 1111111111111110");
        assert_eq!(decode_bits(&bits), Some(b"A".to_vec()));
    }

    #[test]
    fn test_sentinel_found_off_byte_boundary() {
        // Sentinel starts at bit 4.
        let bits = bits_from_str("0000 1111111111111110 0000");
        assert_eq!(decode_bits(&bits), Some(Vec::new()));
    }

    #[test]
    fn test_sentinel_collision_truncates_message() {
        // 0xFF 0xFE is the sentinel itself; everything after it is lost.
        let bits = encode_bits(&[b'a', 0xFF, 0xFE, b'b']);
        assert_eq!(decode_bits(&bits), Some(b"a".to_vec()));
    }

    #[test]
    fn test_scanner_needs_sixteen_bits() {
        let mut scanner = SentinelScanner::new();
        // A leading zero window must not match before 16 bits are seen.
        for _ in 0..15 {
            assert!(!scanner.push(1));
        }
        assert!(!scanner.push(1));
        assert!(scanner.push(0));
    }
}
