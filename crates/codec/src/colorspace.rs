//! YUV→RGB conversion over tight, cropped planes.
//!
//! The matrix math is delegated to `yuvutils-rs`; the integer scalar path
//! below only runs when the library call reports an error (e.g. degenerate
//! plane shapes from odd geometries).

use rawlake_core::prelude::{ColorSpace, Subsampling};
use rayon::prelude::*;
use yuvutils_rs::{YuvPlanarImage, YuvRange, YuvStandardMatrix};

#[derive(Clone, Copy)]
struct YuvCoeffs {
    r_v: i32,
    g_u: i32,
    g_v: i32,
    b_u: i32,
    full_range: bool,
}

const BT709: YuvCoeffs = YuvCoeffs {
    r_v: 459,
    g_u: 55,
    g_v: 136,
    b_u: 541,
    full_range: false,
};

// Full-range Rec.601 coefficients (Y range 0..255).
const BT601_FULL: YuvCoeffs = YuvCoeffs {
    r_v: 359,
    g_u: 88,
    g_v: 183,
    b_u: 454,
    full_range: true,
};

const BT2020: YuvCoeffs = YuvCoeffs {
    r_v: 430,
    g_u: 48,
    g_v: 166,
    b_u: 549,
    full_range: false,
};

/// Integer conversion with clamping.
#[inline(always)]
fn yuv_to_rgb(y: i32, u: i32, v: i32, color: ColorSpace) -> (u8, u8, u8) {
    let coeffs = match color {
        ColorSpace::Bt709 => BT709,
        ColorSpace::Bt2020 => BT2020,
        // `Srgb` means "full-range output"; debug dumps almost always carry
        // a Rec.601 YCbCr matrix with full range.
        ColorSpace::Srgb => BT601_FULL,
        ColorSpace::Unknown => BT709,
    };
    let d = u - 128;
    let e = v - 128;
    let (c, scale) = if coeffs.full_range {
        (y.max(0), 256)
    } else {
        (y.saturating_sub(16).max(0), 298)
    };
    let r = (scale * c + coeffs.r_v * e + 128) >> 8;
    let g = (scale * c - coeffs.g_u * d - coeffs.g_v * e + 128) >> 8;
    let b = (scale * c + coeffs.b_u * d + 128) >> 8;
    (
        r.clamp(0, 255) as u8,
        g.clamp(0, 255) as u8,
        b.clamp(0, 255) as u8,
    )
}

#[inline(always)]
fn map_colorspace(color: ColorSpace) -> (YuvRange, YuvStandardMatrix) {
    match color {
        ColorSpace::Bt709 => (YuvRange::Limited, YuvStandardMatrix::Bt709),
        ColorSpace::Bt2020 => (YuvRange::Limited, YuvStandardMatrix::Bt2020),
        ColorSpace::Srgb => (YuvRange::Full, YuvStandardMatrix::Bt601),
        ColorSpace::Unknown => (YuvRange::Limited, YuvStandardMatrix::Bt709),
    }
}

/// Convert tight Y/U/V planes into a tightly packed RGB24 buffer.
///
/// The luma plane is `width * height` bytes; each chroma plane is
/// `ceil(width / sh) * ceil(height / sv)` bytes for the subsampling factors.
/// Planes must already be cropped of any row padding.
pub(crate) fn yuv_planes_to_rgb(
    y: &[u8],
    u: &[u8],
    v: &[u8],
    width: usize,
    height: usize,
    sub: Subsampling,
    color: ColorSpace,
) -> Vec<u8> {
    let chroma_width = width.div_ceil(sub.horizontal());
    let row_bytes = width * 3;
    let mut rgb = vec![0u8; row_bytes * height];

    let planar = YuvPlanarImage {
        y_plane: y,
        y_stride: width as u32,
        u_plane: u,
        u_stride: chroma_width as u32,
        v_plane: v,
        v_stride: chroma_width as u32,
        width: width as u32,
        height: height as u32,
    };
    let (range, matrix) = map_colorspace(color);
    let converted = match sub {
        Subsampling::S420 => {
            yuvutils_rs::yuv420_to_rgb(&planar, &mut rgb, row_bytes as u32, range, matrix)
        }
        Subsampling::S422 => {
            yuvutils_rs::yuv422_to_rgb(&planar, &mut rgb, row_bytes as u32, range, matrix)
        }
        Subsampling::S444 => {
            yuvutils_rs::yuv444_to_rgb(&planar, &mut rgb, row_bytes as u32, range, matrix)
        }
    };
    if converted.is_ok() {
        return rgb;
    }

    let sh = sub.horizontal();
    let sv = sub.vertical();
    rgb.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(row, dst_line)| {
            let y_line = &y[row * width..][..width];
            let chroma_base = (row / sv) * chroma_width;
            for (x, dst) in dst_line.chunks_exact_mut(3).enumerate() {
                let ci = chroma_base + x / sh;
                let u_val = u.get(ci).copied().unwrap_or(128) as i32;
                let v_val = v.get(ci).copied().unwrap_or(128) as i32;
                let (r, g, b) = yuv_to_rgb(y_line[x] as i32, u_val, v_val, color);
                dst[0] = r;
                dst[1] = g;
                dst[2] = b;
            }
        });
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_chroma_is_grayscale() {
        let y: Vec<u8> = vec![0, 64, 128, 255];
        let u = vec![128u8; 4];
        let v = vec![128u8; 4];
        let rgb = yuv_planes_to_rgb(&y, &u, &v, 4, 1, Subsampling::S444, ColorSpace::Srgb);
        for px in rgb.chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn full_range_preserves_black_and_white() {
        let y = vec![0u8, 255];
        let u = vec![128u8; 2];
        let v = vec![128u8; 2];
        let rgb = yuv_planes_to_rgb(&y, &u, &v, 2, 1, Subsampling::S444, ColorSpace::Srgb);
        assert_eq!(&rgb[..3], &[0, 0, 0]);
        assert_eq!(&rgb[3..], &[255, 255, 255]);
    }

    #[test]
    fn scalar_coefficients_clamp() {
        let (r, g, b) = yuv_to_rgb(255, 255, 255, ColorSpace::Srgb);
        assert_eq!(r, 255);
        assert_eq!(b, 255);
        let _ = g;
        let (r, g, b) = yuv_to_rgb(0, 0, 0, ColorSpace::Bt709);
        assert_eq!((r, b), (0, 0));
        let _ = g;
    }

    #[test]
    fn limited_range_lifts_studio_black() {
        // Y=16 is black in limited range; anything below stays clamped.
        let y = vec![16u8, 10];
        let u = vec![128u8; 2];
        let v = vec![128u8; 2];
        let rgb = yuv_planes_to_rgb(&y, &u, &v, 2, 1, Subsampling::S444, ColorSpace::Bt709);
        assert_eq!(&rgb[..3], &[0, 0, 0]);
        assert_eq!(&rgb[3..], &[0, 0, 0]);
    }
}
