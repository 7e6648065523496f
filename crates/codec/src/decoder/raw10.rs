//! MIPI-style packed 10-bit RAW.
//!
//! Four samples travel in five bytes: four low bytes, then one byte whose bit
//! pairs are the two high bits of each preceding sample, lowest pair first.

use rawlake_core::prelude::{BufferGeometry, ColorSpace, DecodedImage, PixelFormat};
use rayon::prelude::*;

use super::checked_input;
use crate::DecodeError;

/// Expand one 5-byte group into its four 10-bit samples.
#[inline(always)]
pub(crate) fn unpack_group(bytes: [u8; 5]) -> [u16; 4] {
    let [b0, b1, b2, b3, b4] = bytes.map(u16::from);
    [
        b0 | ((b4 & 0x03) << 8),
        b1 | (((b4 >> 2) & 0x03) << 8),
        b2 | (((b4 >> 4) & 0x03) << 8),
        b3 | (((b4 >> 6) & 0x03) << 8),
    ]
}

/// Unpack `dst.len()` samples from a packed row, zero-padding groups that run
/// past the row (widths that are not a multiple of 4).
pub(crate) fn unpack_row(src: &[u8], dst: &mut [u16]) {
    for (group_idx, out) in dst.chunks_mut(4).enumerate() {
        let off = group_idx * 5;
        let mut group = [0u8; 5];
        for (i, byte) in group.iter_mut().enumerate() {
            *byte = src.get(off + i).copied().unwrap_or(0);
        }
        let samples = unpack_group(group);
        out.copy_from_slice(&samples[..out.len()]);
    }
}

pub(crate) fn decode(
    data: &[u8],
    geometry: BufferGeometry,
    _color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    let (src, stride) = checked_input(data, PixelFormat::Raw10Packed, geometry)?;
    let (width, height) = (geometry.width(), geometry.height());

    let mut gray = vec![0u8; width * height];
    gray.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, dst)| {
            let line = &src[row * stride..][..stride];
            let mut samples = vec![0u16; width];
            unpack_row(line, &mut samples);
            for (dst, sample) in dst.iter_mut().zip(&samples) {
                *dst = (sample >> 2) as u8;
            }
        });
    Ok(DecodedImage::gray(
        geometry.width.get(),
        geometry.height.get(),
        gray,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of [`unpack_group`], for building fixtures.
    pub(crate) fn pack_group(samples: [u16; 4]) -> [u8; 5] {
        let mut high = 0u8;
        let mut out = [0u8; 5];
        for (i, s) in samples.iter().enumerate() {
            out[i] = (s & 0xff) as u8;
            high |= (((s >> 8) & 0x03) as u8) << (i * 2);
        }
        out[4] = high;
        out
    }

    #[test]
    fn fifth_byte_carries_two_high_bits_per_sample() {
        let samples = unpack_group([0x00, 0x01, 0x02, 0x03, 0xff]);
        assert_eq!(samples, [0x300, 0x301, 0x302, 0x303]);

        let geom = BufferGeometry::new(4, 1, 0).unwrap();
        let img = decode(&[0x00, 0x01, 0x02, 0x03, 0xff], geom, ColorSpace::Unknown).unwrap();
        assert_eq!(img.data(), &[0xc0, 0xc0, 0xc0, 0xc0]);
    }

    #[test]
    fn pack_then_unpack_is_identity() {
        let samples = [0u16, 0x3ff, 0x155, 0x2aa];
        assert_eq!(unpack_group(pack_group(samples)), samples);
    }

    #[test]
    fn gradient_survives_normalization() {
        let (w, h) = (8usize, 2usize);
        let mut data = Vec::new();
        for row in 0..h {
            for group in 0..w / 4 {
                let base = (row * w + group * 4) as u16 * 16;
                data.extend_from_slice(&pack_group([base, base + 16, base + 32, base + 48]));
            }
        }
        let geom = BufferGeometry::new(w as u32, h as u32, 0).unwrap();
        let img = decode(&data, geom, ColorSpace::Unknown).unwrap();
        let expected: Vec<u8> = (0..w * h).map(|i| (i * 16 / 4) as u8).collect();
        assert_eq!(img.data(), &expected[..]);
    }

    #[test]
    fn width_not_multiple_of_four_pads_with_zero() {
        // 5 samples span one full group and one partial; min_row_bytes(5) = 6.
        let geom = BufferGeometry::new(5, 1, 0).unwrap();
        let data = [0xff, 0xff, 0xff, 0xff, 0xff, 0x40];
        let img = decode(&data, geom, ColorSpace::Unknown).unwrap();
        // The fifth sample has its low byte but loses its high bits to the
        // truncated group tail: 0x040 >> 2.
        assert_eq!(img.data(), &[0xff, 0xff, 0xff, 0xff, 0x10]);
    }
}
