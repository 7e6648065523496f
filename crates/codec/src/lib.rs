#![doc = include_str!("../README.md")]

use rawlake_core::prelude::*;

mod colorspace;
mod decoder;
pub mod registry;

pub mod prelude {
    pub use rawlake_core::prelude::*;

    pub use crate::{DecodeError, decode, decode_named, decode_with};
}

/// Errors a decode call can return.
///
/// Both kinds are deterministic caller-input errors; retrying with the same
/// input never succeeds.
///
/// # Example
/// ```rust
/// use rawlake_codec::DecodeError;
///
/// let err = DecodeError::SizeMismatch { expected: 10, actual: 9 };
/// assert!(matches!(err, DecodeError::SizeMismatch { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Buffer shorter than the declared geometry requires. Raised before any
    /// unpacking, so no decode ever reads past the supplied bytes.
    #[error("buffer too small: expected at least {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Minimum byte count for the declared format and geometry.
        expected: u64,
        /// Length of the supplied buffer.
        actual: u64,
    },
    /// Format identifier not present in the registry.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),
}

/// Decode a raw buffer into an 8-bit image, assuming full-range BT.601 for
/// YUV formats (what the usual debug dumps expect).
///
/// # Example
/// ```rust
/// use rawlake_codec::prelude::*;
///
/// let geom = BufferGeometry::new(2, 2, 0).unwrap();
/// let nv12 = [16u8, 16, 16, 16, 128, 128];
/// let img = decode(&nv12, PixelFormat::Nv12, geom).unwrap();
/// assert_eq!((img.width(), img.height(), img.channels()), (2, 2, Channels::Rgb));
/// ```
pub fn decode(
    data: &[u8],
    format: PixelFormat,
    geometry: BufferGeometry,
) -> Result<DecodedImage, DecodeError> {
    decode_with(data, format, geometry, ColorSpace::Srgb)
}

/// Decode with an explicit colorspace hint for the YUV→RGB step.
///
/// RAW formats ignore the hint; they return the normalized intensity plane.
pub fn decode_with(
    data: &[u8],
    format: PixelFormat,
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    (registry::entry_for(format).decode)(data, geometry, color)
}

/// Decode by display name, as chosen from the registry's closed list.
///
/// # Example
/// ```rust
/// use rawlake_codec::prelude::*;
///
/// let geom = BufferGeometry::new(2, 2, 0).unwrap();
/// let err = decode_named(&[0u8; 64], "FOO", geom).unwrap_err();
/// assert_eq!(err, DecodeError::UnsupportedFormat("FOO".into()));
/// ```
pub fn decode_named(
    data: &[u8],
    name: &str,
    geometry: BufferGeometry,
) -> Result<DecodedImage, DecodeError> {
    let entry = registry::lookup(name)?;
    (entry.decode)(data, geometry, ColorSpace::Srgb)
}

/// Move a decoded image into an [`image::DynamicImage`] without copying.
///
/// Returns `None` only if the buffer length disagrees with the dimensions,
/// which a [`DecodedImage`] from this crate never does.
#[cfg(feature = "image")]
pub fn into_dynamic_image(img: DecodedImage) -> Option<image::DynamicImage> {
    let (width, height, channels) = (img.width(), img.height(), img.channels());
    let data = img.into_vec();
    match channels {
        Channels::Gray => {
            image::GrayImage::from_raw(width, height, data).map(image::DynamicImage::ImageLuma8)
        }
        Channels::Rgb => {
            image::RgbImage::from_raw(width, height, data).map(image::DynamicImage::ImageRgb8)
        }
    }
}
