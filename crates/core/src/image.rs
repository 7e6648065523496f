/// Channel layout of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channels {
    /// Single 8-bit intensity channel.
    Gray,
    /// Interleaved 8-bit R, G, B.
    Rgb,
}

impl Channels {
    /// Samples per pixel.
    pub const fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }
}

/// An owned, tightly packed 8-bit image produced by a decode call.
///
/// Rows are `width * channels.count()` bytes with no padding. The buffer is
/// allocated fresh per call and never mutated after construction.
///
/// # Example
/// ```rust
/// use rawlake_core::prelude::{Channels, DecodedImage};
///
/// let img = DecodedImage::gray(2, 2, vec![0, 1, 2, 3]);
/// assert_eq!(img.channels(), Channels::Gray);
/// assert_eq!(img.row(1), &[2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl DecodedImage {
    /// Wrap a single-channel buffer. `data` must be `width * height` bytes.
    pub fn gray(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            channels: Channels::Gray,
            data,
        }
    }

    /// Wrap an RGB buffer. `data` must be `width * height * 3` bytes.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 3);
        Self {
            width,
            height,
            channels: Channels::Rgb,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Bytes per row.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    /// The full pixel buffer, row-major, no padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// One row of pixels.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {y} out of range");
        let row_bytes = self.row_bytes();
        &self.data[y as usize * row_bytes..][..row_bytes]
    }

    /// Consume into the backing buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_tight() {
        let img = DecodedImage::rgb(2, 2, (0..12).collect());
        assert_eq!(img.row_bytes(), 6);
        assert_eq!(img.row(0), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(img.row(1), &[6, 7, 8, 9, 10, 11]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn row_out_of_range_panics() {
        let img = DecodedImage::gray(1, 1, vec![0]);
        let _ = img.row(1);
    }
}
