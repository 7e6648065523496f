//! Packed 4:2:2 in Y/U/Y/V byte order: two pixels per 4-byte macropixel
//! sharing one chroma pair.

use rawlake_core::prelude::{BufferGeometry, ColorSpace, DecodedImage, PixelFormat, Subsampling};
use rayon::prelude::*;

use super::checked_input;
use crate::{DecodeError, colorspace};

pub(crate) fn decode(
    data: &[u8],
    geometry: BufferGeometry,
    color: ColorSpace,
) -> Result<DecodedImage, DecodeError> {
    let (src, stride) = checked_input(data, PixelFormat::Yuyv, geometry)?;
    let (width, height) = (geometry.width(), geometry.height());
    let chroma_width = width.div_ceil(2);

    let mut y = vec![0u8; width * height];
    let mut u = vec![128u8; chroma_width * height];
    let mut v = vec![128u8; chroma_width * height];
    y.par_chunks_mut(width)
        .zip(u.par_chunks_mut(chroma_width))
        .zip(v.par_chunks_mut(chroma_width))
        .enumerate()
        .for_each(|(row, ((y_row, u_row), v_row))| {
            let line = &src[row * stride..][..stride];
            for (x, y_dst) in y_row.iter_mut().enumerate() {
                *y_dst = line.get(x * 2).copied().unwrap_or(0);
            }
            for (p, (u_dst, v_dst)) in u_row.iter_mut().zip(v_row.iter_mut()).enumerate() {
                *u_dst = line.get(p * 4 + 1).copied().unwrap_or(128);
                *v_dst = line.get(p * 4 + 3).copied().unwrap_or(128);
            }
        });

    let rgb = colorspace::yuv_planes_to_rgb(&y, &u, &v, width, height, Subsampling::S422, color);
    Ok(DecodedImage::rgb(
        geometry.width.get(),
        geometry.height.get(),
        rgb,
    ))
}
