//! MIPI-style packed 12-bit RAW: two samples in three bytes, the third byte
//! holding each sample's four high bits (low nibble first).

use rawlake_core::prelude::{BufferGeometry, ColorSpace, DecodedImage, PixelFormat};
use rayon::prelude::*;

use super::checked_input;
use crate::DecodeError;

#[inline(always)]
pub(crate) fn unpack_group(bytes: [u8; 3]) -> [u16; 2] {
    let [b0, b1, b2] = bytes.map(u16::from);
    [b0 | ((b2 & 0x0f) << 8), b1 | (((b2 >> 4) & 0x0f) << 8)]
}

pub(crate) fn unpack_row(src: &[u8], dst: &mut [u16]) {
    for (group_idx, out) in dst.chunks_mut(2).enumerate() {
        let off = group_idx * 3;
        let mut group = [0u8; 3];
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
    let (src, stride) = checked_input(data, PixelFormat::Raw12Packed, geometry)?;
    let (width, height) = (geometry.width(), geometry.height());

    let mut gray = vec![0u8; width * height];
    gray.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, dst)| {
            let line = &src[row * stride..][..stride];
            let mut samples = vec![0u16; width];
            unpack_row(line, &mut samples);
            for (dst, sample) in dst.iter_mut().zip(&samples) {
                *dst = (sample >> 4) as u8;
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

    fn pack_group(samples: [u16; 2]) -> [u8; 3] {
        [
            (samples[0] & 0xff) as u8,
            (samples[1] & 0xff) as u8,
            (((samples[0] >> 8) & 0x0f) | (((samples[1] >> 8) & 0x0f) << 4)) as u8,
        ]
    }

    #[test]
    fn third_byte_splits_into_nibbles() {
        assert_eq!(unpack_group([0x00, 0x01, 0xf0]), [0x000, 0xf01]);
        assert_eq!(unpack_group([0xab, 0xcd, 0x21]), [0x1ab, 0x2cd]);
        assert_eq!(unpack_group(pack_group([0xfff, 0x000])), [0xfff, 0x000]);
    }

    #[test]
    fn full_scale_normalizes_to_255() {
        let geom = BufferGeometry::new(2, 1, 0).unwrap();
        let img = decode(&[0xff, 0x00, 0x0f], geom, ColorSpace::Unknown).unwrap();
        assert_eq!(img.data(), &[0xff, 0x00]);
    }

    #[test]
    fn rows_decode_independently_under_padding() {
        let (w, h) = (2usize, 2usize);
        let stride = 8; // min is 3
        let mut data = vec![0xeeu8; stride * h];
        data[..3].copy_from_slice(&pack_group([0x100, 0x200]));
        data[stride..stride + 3].copy_from_slice(&pack_group([0x300, 0x400]));
        let geom = BufferGeometry::new(w as u32, h as u32, stride).unwrap();
        let img = decode(&data, geom, ColorSpace::Unknown).unwrap();
        assert_eq!(img.data(), &[0x10, 0x20, 0x30, 0x40]);
    }
}
