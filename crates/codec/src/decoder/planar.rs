//! Fully planar YUV: separate Y, U and V planes laid out back to back.

use rawlake_core::prelude::{
    BufferGeometry, ChromaOrder, ColorSpace, DecodedImage, PixelFormat, Subsampling,
};

use super::{checked_input, copy_rows};
use crate::{DecodeError, colorspace};

/// 4:2:0 three-plane layout: full-stride luma, then two half-stride chroma
/// planes. `order` picks which chroma plane comes first.
fn decode_planar_420(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
    format: PixelFormat,
    order: ChromaOrder,
) -> Result<DecodedImage, DecodeError> {
    let (src, stride) = checked_input(data, format, geometry)?;
    let (width, height) = (geometry.width(), geometry.height());

    let (luma, chroma) = src.split_at(stride * height);
    let y = copy_rows(luma, stride, height, width, 0);

    let chroma_stride = stride / 2;
    let chroma_width = width.div_ceil(2);
    let chroma_height = height.div_ceil(2);
    let (first, second) = chroma.split_at(chroma.len() / 2);
    let (u_plane, v_plane) = match order {
        ChromaOrder::UFirst => (first, second),
        ChromaOrder::VFirst => (second, first),
    };
    let u = copy_rows(u_plane, chroma_stride, chroma_height, chroma_width, 128);
    let v = copy_rows(v_plane, chroma_stride, chroma_height, chroma_width, 128);

    let rgb = colorspace::yuv_planes_to_rgb(&y, &u, &v, width, height, Subsampling::S420, color);
    Ok(DecodedImage::rgb(
        geometry.width.get(),
        geometry.height.get(),
        rgb,
    ))
}

pub(crate) fn decode_i420(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_planar_420(data, geometry, color, PixelFormat::I420, ChromaOrder::UFirst)
}

pub(crate) fn decode_yv12(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_planar_420(data, geometry, color, PixelFormat::Yv12, ChromaOrder::VFirst)
}

/// 4:4:4 three-plane layout: three planes of identical shape.
pub(crate) fn decode_i444(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    let (src, stride) = checked_input(data, PixelFormat::I444, geometry)?;
    let (width, height) = (geometry.width(), geometry.height());

    let plane_len = stride * height;
    let y = copy_rows(&src[..plane_len], stride, height, width, 0);
    let u = copy_rows(&src[plane_len..2 * plane_len], stride, height, width, 128);
    let v = copy_rows(&src[2 * plane_len..], stride, height, width, 128);

    let rgb = colorspace::yuv_planes_to_rgb(&y, &u, &v, width, height, Subsampling::S444, color);
    Ok(DecodedImage::rgb(
        geometry.width.get(),
        geometry.height.get(),
        rgb,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(width: u32, height: u32, stride: usize) -> BufferGeometry {
        BufferGeometry::new(width, height, stride).unwrap()
    }

    #[test]
    fn i420_padded_stride_matches_tight() {
        // Chroma rows run at half the luma stride, so the padded relayout has
        // to happen per plane.
        let (w, h) = (4usize, 4usize);
        let tight = geom(w as u32, h as u32, 0);
        let padded = geom(w as u32, h as u32, w + 4);
        let stride = padded.effective_stride(PixelFormat::I420);
        let chroma_stride = stride / 2;
        let (cw, ch) = (w / 2, h / 2);

        let luma: Vec<u8> = (0..w * h).map(|i| (i * 15) as u8).collect();
        let u_plane: Vec<u8> = (0..cw * ch).map(|i| (90 + i * 17) as u8).collect();
        let v_plane: Vec<u8> = (0..cw * ch).map(|i| (170 - i * 17) as u8).collect();
        let mut tight_data = luma.clone();
        tight_data.extend_from_slice(&u_plane);
        tight_data.extend_from_slice(&v_plane);

        let mut padded_data = vec![0u8; padded.expected_size(PixelFormat::I420) as usize];
        for (row, src) in luma.chunks(w).enumerate() {
            padded_data[row * stride..][..w].copy_from_slice(src);
        }
        let u_base = stride * h;
        let v_base = u_base + chroma_stride * ch;
        for (row, src) in u_plane.chunks(cw).enumerate() {
            padded_data[u_base + row * chroma_stride..][..cw].copy_from_slice(src);
        }
        for (row, src) in v_plane.chunks(cw).enumerate() {
            padded_data[v_base + row * chroma_stride..][..cw].copy_from_slice(src);
        }

        assert_eq!(
            decode_i420(&tight_data, tight, ColorSpace::Srgb).unwrap(),
            decode_i420(&padded_data, padded, ColorSpace::Srgb).unwrap(),
        );
    }

    #[test]
    fn i444_matches_nv24_for_same_samples() {
        // Same logical samples, planar vs interleaved chroma.
        let (w, h) = (4usize, 2usize);
        let g = geom(w as u32, h as u32, 0);
        let luma: Vec<u8> = (0..w * h).map(|i| (i * 29) as u8).collect();
        let u_plane: Vec<u8> = (0..w * h).map(|i| (50 + i * 7) as u8).collect();
        let v_plane: Vec<u8> = (0..w * h).map(|i| (210 - i * 7) as u8).collect();

        let mut i444 = luma.clone();
        i444.extend_from_slice(&u_plane);
        i444.extend_from_slice(&v_plane);

        let mut nv24 = luma.clone();
        for (u, v) in u_plane.iter().zip(&v_plane) {
            nv24.extend_from_slice(&[*u, *v]);
        }

        assert_eq!(
            decode_i444(&i444, g, ColorSpace::Srgb).unwrap(),
            super::super::nv::decode_nv24(&nv24, g, ColorSpace::Srgb).unwrap(),
        );
    }

    #[test]
    fn odd_height_truncates_chroma_to_neutral() {
        // 2x3 I420: expected floors to 9 bytes, leaving 1.5 bytes per chroma
        // plane. The cut-off samples decode as neutral rather than panicking.
        let g = geom(2, 3, 0);
        let len = g.expected_size(PixelFormat::I420) as usize;
        assert_eq!(len, 9);
        let img = decode_i420(&vec![60u8; len], g, ColorSpace::Srgb).unwrap();
        assert_eq!((img.width(), img.height()), (2, 3));
    }
}
