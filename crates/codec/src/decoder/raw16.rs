//! RAW samples stored one per 16-bit little-endian word, value in the low
//! bits. Sensors and ISPs emit these as the "unpacked" variant of the packed
//! MIPI formats, usually with the unused high bits zeroed.

use rawlake_core::prelude::{BufferGeometry, ColorSpace, DecodedImage, PixelFormat};
use rayon::prelude::*;

use super::checked_input;
use crate::DecodeError;

/// Read a strided region of 16-bit LE words and normalize each to 8 bits by
/// dropping `shift` low bits. Words cut off by the region's end become `fill`.
pub(crate) fn normalize_words(
    src: &[u8],
    stride: usize,
    rows: usize,
    width: usize,
    shift: u32,
    fill: u8,
) -> Vec<u8> {
    let mut out = vec![fill; rows * width];
    out.par_chunks_mut(width).enumerate().for_each(|(row, dst)| {
        let base = row * stride;
        for (x, dst) in dst.iter_mut().enumerate() {
            let off = base + x * 2;
            if off + 1 < src.len() {
                let word = u16::from_le_bytes([src[off], src[off + 1]]);
                *dst = ((word >> shift) & 0xff) as u8;
            }
        }
    });
    out
}

fn decode_words(
    data: &[u8],
    geometry: BufferGeometry,
    format: PixelFormat,
) -> Result<DecodedImage, DecodeError> {
    let (src, stride) = checked_input(data, format, geometry)?;
    let shift = u32::from(format.bit_depth()) - 8;
    let gray = normalize_words(src, stride, geometry.height(), geometry.width(), shift, 0);
    Ok(DecodedImage::gray(
        geometry.width.get(),
        geometry.height.get(),
        gray,
    ))
}

pub(crate) fn decode_raw10(
    data: &[u8],
    geometry: BufferGeometry,
    _color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_words(data, geometry, PixelFormat::Raw10Unpacked)
}

pub(crate) fn decode_raw12(
    data: &[u8],
    geometry: BufferGeometry,
    _color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_words(data, geometry, PixelFormat::Raw12Unpacked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn ten_bit_words_drop_two_low_bits() {
        let data = words(&[0x000, 0x001, 0x004, 0x3ff]);
        let geom = BufferGeometry::new(4, 1, 0).unwrap();
        let img = decode_raw10(&data, geom, ColorSpace::Unknown).unwrap();
        assert_eq!(img.data(), &[0x00, 0x00, 0x01, 0xff]);
    }

    #[test]
    fn twelve_bit_words_drop_four_low_bits() {
        let data = words(&[0x00f, 0x010, 0xfff, 0x800]);
        let geom = BufferGeometry::new(2, 2, 0).unwrap();
        let img = decode_raw12(&data, geom, ColorSpace::Unknown).unwrap();
        assert_eq!(img.data(), &[0x00, 0x01, 0xff, 0x80]);
    }

    #[test]
    fn garbage_high_bits_are_masked() {
        // Bits above the declared depth must not leak into the output.
        let data = words(&[0xfc00]);
        let geom = BufferGeometry::new(1, 1, 0).unwrap();
        let img = decode_raw10(&data, geom, ColorSpace::Unknown).unwrap();
        assert_eq!(img.data(), &[0x00]);
    }

    #[test]
    fn stride_padding_is_skipped() {
        let mut data = words(&[0x3ff, 0x3ff, 0, 0, 0x000, 0x000, 0, 0]);
        data.truncate(16);
        let geom = BufferGeometry::new(2, 2, 8).unwrap();
        let img = decode_raw10(&data, geom, ColorSpace::Unknown).unwrap();
        assert_eq!(img.data(), &[0xff, 0xff, 0x00, 0x00]);
    }
}
