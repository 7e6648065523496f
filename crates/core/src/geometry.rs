use std::num::NonZeroU32;

use crate::format::PixelFormat;

/// Caller-declared geometry of a raw buffer.
///
/// `stride` is the byte distance between row starts; 0 means "derive from
/// width and the format's bytes-per-row formula". An explicit stride smaller
/// than the format minimum is clamped up, so the effective stride is always a
/// deterministic function of the inputs.
///
/// # Example
/// ```rust
/// use rawlake_core::prelude::{BufferGeometry, PixelFormat};
///
/// let geom = BufferGeometry::new(4, 1, 0).unwrap();
/// assert_eq!(geom.effective_stride(PixelFormat::Raw10Packed), 5);
/// assert_eq!(geom.expected_size(PixelFormat::Raw10Packed), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferGeometry {
    /// Width in pixels (non-zero).
    pub width: NonZeroU32,
    /// Height in pixels (non-zero).
    pub height: NonZeroU32,
    /// Declared stride in bytes; 0 derives it from the width.
    pub stride: usize,
}

impl BufferGeometry {
    /// Create a geometry, returning `None` if width or height are zero.
    pub fn new(width: u32, height: u32, stride: usize) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
            stride,
        })
    }

    /// Width in pixels as `usize`.
    pub fn width(&self) -> usize {
        self.width.get() as usize
    }

    /// Height in pixels as `usize`.
    pub fn height(&self) -> usize {
        self.height.get() as usize
    }

    /// Stride actually used for row addressing: the declared stride clamped
    /// to the format minimum, or the derived minimum when declared as 0.
    pub fn effective_stride(&self, format: PixelFormat) -> usize {
        let min = format.min_row_bytes(self.width());
        if self.stride == 0 {
            min
        } else {
            self.stride.max(min)
        }
    }

    /// Minimum byte count a buffer must have for this geometry and format.
    ///
    /// Effective stride times the row count implied by the plane layout
    /// (e.g. `height * 3 / 2` for 4:2:0 semi-planar). Computed in `u128` and
    /// saturated to `u64::MAX`; no real buffer reaches that length, so a
    /// saturated size can only ever fail the length check.
    pub fn expected_size(&self, format: PixelFormat) -> u64 {
        let stride = self.effective_stride(format) as u128;
        let (num, den) = format.plane_rows();
        let size = stride * u128::from(self.height.get()) * u128::from(num) / u128::from(den);
        u64::try_from(size).unwrap_or(u64::MAX)
    }
}
