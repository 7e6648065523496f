//! Per-family decode functions plus the shared buffer plumbing.
//!
//! Each submodule owns one storage family: how bytes become samples. The
//! YUV→RGB step itself lives in [`crate::colorspace`], so swapped-order and
//! wide-word siblings of a layout share everything but the sample extraction.

use rawlake_core::prelude::{BufferGeometry, PixelFormat};

use crate::DecodeError;

pub(crate) mod nv;
pub(crate) mod planar;
pub(crate) mod raw10;
pub(crate) mod raw12;
pub(crate) mod raw16;
pub(crate) mod yuyv;

/// Validate the buffer against the declared geometry.
///
/// Returns the input truncated to exactly the expected byte count plus the
/// effective stride, so decoders can slice rows without further bounds
/// checks and trailing slack in the caller's buffer never changes the
/// output.
pub(crate) fn checked_input<'a>(
    data: &'a [u8],
    format: PixelFormat,
    geometry: BufferGeometry,
) -> Result<(&'a [u8], usize), DecodeError> {
    let expected = geometry.expected_size(format);
    if (data.len() as u64) < expected {
        return Err(DecodeError::SizeMismatch {
            expected,
            actual: data.len() as u64,
        });
    }
    Ok((&data[..expected as usize], geometry.effective_stride(format)))
}

/// Copy `rows` rows of `row_bytes` payload out of a strided region into a
/// tight buffer, padding with `fill` where the region runs short.
///
/// The short-read case only arises for layouts whose tail plane is cut off by
/// odd dimensions; `fill` is 128 (neutral chroma) there.
pub(crate) fn copy_rows(
    src: &[u8],
    stride: usize,
    rows: usize,
    row_bytes: usize,
    fill: u8,
) -> Vec<u8> {
    let mut out = vec![fill; rows * row_bytes];
    for (row_idx, dst) in out.chunks_exact_mut(row_bytes).enumerate() {
        let start = row_idx * stride;
        if start >= src.len() {
            break;
        }
        let avail = (src.len() - start).min(row_bytes);
        dst[..avail].copy_from_slice(&src[start..start + avail]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_input_truncates_to_expected() {
        let geom = BufferGeometry::new(4, 1, 0).unwrap();
        let data = [0u8; 9];
        let (trimmed, stride) = checked_input(&data, PixelFormat::Raw10Packed, geom).unwrap();
        assert_eq!(trimmed.len(), 5);
        assert_eq!(stride, 5);
    }

    #[test]
    fn checked_input_rejects_short_buffers() {
        let geom = BufferGeometry::new(4, 2, 0).unwrap();
        let err = checked_input(&[0u8; 9], PixelFormat::Raw10Packed, geom).unwrap_err();
        assert_eq!(
            err,
            DecodeError::SizeMismatch {
                expected: 10,
                actual: 9,
            }
        );
    }

    #[test]
    fn copy_rows_strips_padding_and_fills_short_tails() {
        let src = [1u8, 2, 9, 9, 3, 4, 9, 9, 5];
        // Three rows of 2 payload bytes at stride 4; the last row is short.
        assert_eq!(copy_rows(&src, 4, 3, 2, 0), vec![1, 2, 3, 4, 5, 0]);
        // A row starting past the end stays all-fill.
        assert_eq!(copy_rows(&src[..2], 4, 2, 2, 128), vec![1, 2, 128, 128]);
    }
}
