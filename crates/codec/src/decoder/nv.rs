//! Semi-planar YUV: a full-resolution luma plane followed by one interleaved
//! chroma plane. Covers the 8-bit NV family and the 16-bit-word P010/P012/
//! NV20 variants; the swapped-order siblings differ only in which component
//! comes first in each chroma pair.

use rawlake_core::prelude::{
    BufferGeometry, ChromaOrder, ColorSpace, DecodedImage, PixelFormat, Subsampling,
};
use rayon::prelude::*;

use super::{checked_input, copy_rows, raw16::normalize_words};
use crate::{DecodeError, colorspace};

fn decode_semi_planar(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
    format: PixelFormat,
    sub: Subsampling,
    order: ChromaOrder,
) -> Result<DecodedImage, DecodeError> {
    let (src, stride) = checked_input(data, format, geometry)?;
    let (width, height) = (geometry.width(), geometry.height());
    let wide = format.bytes_per_sample() == 2;
    let shift = u32::from(format.bit_depth()) - 8;

    let (luma, chroma) = src.split_at(stride * height);
    let y = if wide {
        normalize_words(luma, stride, height, width, shift, 0)
    } else {
        copy_rows(luma, stride, height, width, 0)
    };

    // One interleaved chroma row holds 2 samples per chroma column, so its
    // byte stride is the luma stride scaled by 2 / horizontal subsampling.
    let chroma_width = width.div_ceil(sub.horizontal());
    let chroma_height = height.div_ceil(sub.vertical());
    let chroma_stride = stride * 2 / sub.horizontal();
    let sample_bytes = if wide { 2 } else { 1 };
    let (u_off, v_off) = match order {
        ChromaOrder::UFirst => (0, 1),
        ChromaOrder::VFirst => (1, 0),
    };

    let mut u = vec![128u8; chroma_width * chroma_height];
    let mut v = vec![128u8; chroma_width * chroma_height];
    u.par_chunks_mut(chroma_width)
        .zip(v.par_chunks_mut(chroma_width))
        .enumerate()
        .for_each(|(cy, (u_row, v_row))| {
            let base = cy * chroma_stride;
            for (p, (u_dst, v_dst)) in u_row.iter_mut().zip(v_row.iter_mut()).enumerate() {
                let pair = base + p * 2 * sample_bytes;
                if wide {
                    for (off, dst) in [(u_off, u_dst), (v_off, v_dst)] {
                        let at = pair + off * 2;
                        if at + 1 < chroma.len() {
                            let word = u16::from_le_bytes([chroma[at], chroma[at + 1]]);
                            *dst = ((word >> shift) & 0xff) as u8;
                        }
                    }
                } else {
                    *u_dst = chroma.get(pair + u_off).copied().unwrap_or(128);
                    *v_dst = chroma.get(pair + v_off).copied().unwrap_or(128);
                }
            }
        });

    let rgb = colorspace::yuv_planes_to_rgb(&y, &u, &v, width, height, sub, color);
    Ok(DecodedImage::rgb(
        geometry.width.get(),
        geometry.height.get(),
        rgb,
    ))
}

pub(crate) fn decode_nv12(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_semi_planar(
        data,
        geometry,
        color,
        PixelFormat::Nv12,
        Subsampling::S420,
        ChromaOrder::UFirst,
    )
}

pub(crate) fn decode_nv21(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_semi_planar(
        data,
        geometry,
        color,
        PixelFormat::Nv21,
        Subsampling::S420,
        ChromaOrder::VFirst,
    )
}

pub(crate) fn decode_p010(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_semi_planar(
        data,
        geometry,
        color,
        PixelFormat::P010,
        Subsampling::S420,
        ChromaOrder::UFirst,
    )
}

pub(crate) fn decode_p012(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_semi_planar(
        data,
        geometry,
        color,
        PixelFormat::P012,
        Subsampling::S420,
        ChromaOrder::UFirst,
    )
}

pub(crate) fn decode_nv16(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_semi_planar(
        data,
        geometry,
        color,
        PixelFormat::Nv16,
        Subsampling::S422,
        ChromaOrder::UFirst,
    )
}

pub(crate) fn decode_nv61(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_semi_planar(
        data,
        geometry,
        color,
        PixelFormat::Nv61,
        Subsampling::S422,
        ChromaOrder::VFirst,
    )
}

pub(crate) fn decode_nv20(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_semi_planar(
        data,
        geometry,
        color,
        PixelFormat::Nv20,
        Subsampling::S422,
        ChromaOrder::UFirst,
    )
}

pub(crate) fn decode_nv24(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_semi_planar(
        data,
        geometry,
        color,
        PixelFormat::Nv24,
        Subsampling::S444,
        ChromaOrder::UFirst,
    )
}

pub(crate) fn decode_nv42(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    decode_semi_planar(
        data,
        geometry,
        color,
        PixelFormat::Nv42,
        Subsampling::S444,
        ChromaOrder::VFirst,
    )
}
