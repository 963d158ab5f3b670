//! Pixel traversal shared by the encoder and decoder.
//!
//! Slots are visited row by row, left to right, and R, G, B within a pixel.
//! Each slot is reported as an index into the image's contiguous sample
//! buffer, so any alpha (or further) channel is skipped over by the stride.

/// Colour channels carrying payload bits per pixel.
pub const CARRIER_CHANNELS: usize = 3;

/// Total number of writable bit slots in a `width` x `height` image.
pub fn capacity(width: u32, height: u32) -> usize {
    width as usize * height as usize * CARRIER_CHANNELS
}

/// Lazy, finite iterator over sample-buffer indices in traversal order.
///
/// Cheap to construct, so each encode/decode call builds a fresh one.
#[derive(Debug, Clone)]
pub struct ChannelSlots {
    pixel: usize,
    channel: usize,
    pixel_count: usize,
    stride: usize,
}

impl ChannelSlots {
    /// `stride` is the number of samples per pixel in the buffer (3 for RGB,
    /// 4 for RGBA). Must be at least [`CARRIER_CHANNELS`].
    pub fn new(width: u32, height: u32, stride: usize) -> Self {
        debug_assert!(stride >= CARRIER_CHANNELS);
        Self {
            pixel: 0,
            channel: 0,
            pixel_count: width as usize * height as usize,
            stride,
        }
    }
}

impl Iterator for ChannelSlots {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.pixel >= self.pixel_count {
            return None;
        }

        let index = self.pixel * self.stride + self.channel;

        self.channel += 1;
        if self.channel == CARRIER_CHANNELS {
            self.channel = 0;
            self.pixel += 1;
        }

        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .pixel_count
            .saturating_sub(self.pixel)
            .saturating_mul(CARRIER_CHANNELS)
            .saturating_sub(self.channel);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChannelSlots {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_order() {
        let slots: Vec<usize> = ChannelSlots::new(2, 2, 3).collect();
        assert_eq!(slots, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_rgba_skips_alpha() {
        let slots: Vec<usize> = ChannelSlots::new(2, 1, 4).collect();
        assert_eq!(slots, vec![0, 1, 2, 4, 5, 6]);
    }

    #[test]
    fn test_len_matches_capacity() {
        let slots = ChannelSlots::new(7, 5, 4);
        assert_eq!(slots.len(), capacity(7, 5));
        assert_eq!(slots.count(), 105);
    }

    #[test]
    fn test_size_hint_shrinks() {
        let mut slots = ChannelSlots::new(1, 1, 3);
        assert_eq!(slots.len(), 3);
        slots.next();
        assert_eq!(slots.len(), 2);
        slots.next();
        slots.next();
        assert_eq!(slots.len(), 0);
        assert_eq!(slots.next(), None);
    }

    #[test]
    fn test_empty_image() {
        assert_eq!(ChannelSlots::new(0, 10, 3).next(), None);
        assert_eq!(capacity(0, 10), 0);
    }
}
