use std::{fmt, str::FromStr};

/// Chroma subsampling ratio of a YUV format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subsampling {
    /// 4:2:0 — chroma halved horizontally and vertically.
    S420,
    /// 4:2:2 — chroma halved horizontally.
    S422,
    /// 4:4:4 — full-resolution chroma.
    S444,
}

impl Subsampling {
    /// Horizontal subsampling factor (luma samples per chroma sample).
    pub const fn horizontal(self) -> usize {
        match self {
            Subsampling::S420 | Subsampling::S422 => 2,
            Subsampling::S444 => 1,
        }
    }

    /// Vertical subsampling factor.
    pub const fn vertical(self) -> usize {
        match self {
            Subsampling::S420 => 2,
            Subsampling::S422 | Subsampling::S444 => 1,
        }
    }
}

/// Order of the chroma components within a plane.
///
/// Swapped-order siblings (NV21 vs NV12, YV12 vs I420, NV42 vs NV24) share
/// layout logic with only this flag flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChromaOrder {
    /// U (Cb) before V (Cr).
    UFirst,
    /// V (Cr) before U (Cb).
    VFirst,
}

/// Basic color space hints for the YUV→RGB conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSpace {
    /// Full-range Rec.601 output (what most debug dumps assume).
    Srgb,
    /// Rec. 709, limited range.
    Bt709,
    /// Rec. 2020, limited range.
    Bt2020,
    /// Unspecified/unknown.
    Unknown,
}

/// Pixel layout of a raw camera buffer.
///
/// The catalogue is closed: every variant maps to exactly one decode function
/// and one display name, and an unknown name never falls back silently.
///
/// The RAW10/RAW12 packed variants follow the MIPI-style convention where the
/// trailing byte of each group carries the low bits of the preceding samples.
/// Some sensor vendors pack differently; buffers from such parts need their
/// own entry rather than a reinterpretation of these.
///
/// # Example
/// ```rust
/// use rawlake_core::prelude::PixelFormat;
///
/// let fmt = PixelFormat::from_name("nv12").unwrap();
/// assert_eq!(fmt, PixelFormat::Nv12);
/// assert_eq!(fmt.display_name(), "NV12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// 10-bit packed RAW: 5 bytes per 4 samples, high bits in the 5th byte.
    Raw10Packed,
    /// 12-bit packed RAW: 3 bytes per 2 samples, high bits in the 3rd byte.
    Raw12Packed,
    /// 10-bit RAW stored one sample per 16-bit little-endian word.
    Raw10Unpacked,
    /// 12-bit RAW stored one sample per 16-bit little-endian word.
    Raw12Unpacked,
    /// 8-bit 4:2:0 semi-planar, U-first chroma.
    Nv12,
    /// 8-bit 4:2:0 semi-planar, V-first chroma.
    Nv21,
    /// 10-bit (16-bit words) 4:2:0 semi-planar, U-first chroma.
    P010,
    /// 12-bit (16-bit words) 4:2:0 semi-planar, U-first chroma.
    P012,
    /// 8-bit 4:2:2 semi-planar, U-first chroma.
    Nv16,
    /// 8-bit 4:2:2 semi-planar, V-first chroma.
    Nv61,
    /// 10-bit (16-bit words) 4:2:2 semi-planar, U-first chroma.
    Nv20,
    /// 8-bit 4:4:4 semi-planar, U-first chroma.
    Nv24,
    /// 8-bit 4:4:4 semi-planar, V-first chroma.
    Nv42,
    /// 8-bit 4:2:0 planar, U plane before V plane.
    I420,
    /// 8-bit 4:2:0 planar, V plane before U plane.
    Yv12,
    /// 8-bit 4:4:4 planar.
    I444,
    /// 8-bit packed 4:2:2, Y/U/Y/V byte order.
    Yuyv,
}

impl PixelFormat {
    /// Every supported format, in registry order.
    pub const ALL: [PixelFormat; 17] = [
        PixelFormat::Raw10Packed,
        PixelFormat::Raw12Packed,
        PixelFormat::Raw10Unpacked,
        PixelFormat::Raw12Unpacked,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
        PixelFormat::P010,
        PixelFormat::P012,
        PixelFormat::Nv16,
        PixelFormat::Nv61,
        PixelFormat::Nv20,
        PixelFormat::Nv24,
        PixelFormat::Nv42,
        PixelFormat::I420,
        PixelFormat::Yv12,
        PixelFormat::I444,
        PixelFormat::Yuyv,
    ];

    /// Human-facing identifier, also the registry key.
    pub const fn display_name(self) -> &'static str {
        match self {
            PixelFormat::Raw10Packed => "RAW10",
            PixelFormat::Raw12Packed => "RAW12",
            PixelFormat::Raw10Unpacked => "RAW10_UNPACKED",
            PixelFormat::Raw12Unpacked => "RAW12_UNPACKED",
            PixelFormat::Nv12 => "NV12",
            PixelFormat::Nv21 => "NV21",
            PixelFormat::P010 => "P010",
            PixelFormat::P012 => "P012",
            PixelFormat::Nv16 => "NV16",
            PixelFormat::Nv61 => "NV61",
            PixelFormat::Nv20 => "NV20",
            PixelFormat::Nv24 => "NV24",
            PixelFormat::Nv42 => "NV42",
            PixelFormat::I420 => "I420",
            PixelFormat::Yv12 => "YV12",
            PixelFormat::I444 => "YUV444",
            PixelFormat::Yuyv => "YUYV",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.display_name().eq_ignore_ascii_case(name))
    }

    /// Significant bits per sample before normalization to 8.
    pub const fn bit_depth(self) -> u8 {
        match self {
            PixelFormat::Raw10Packed
            | PixelFormat::Raw10Unpacked
            | PixelFormat::P010
            | PixelFormat::Nv20 => 10,
            PixelFormat::Raw12Packed | PixelFormat::Raw12Unpacked | PixelFormat::P012 => 12,
            _ => 8,
        }
    }

    /// Chroma subsampling, or `None` for single-channel RAW formats.
    pub const fn subsampling(self) -> Option<Subsampling> {
        match self {
            PixelFormat::Raw10Packed
            | PixelFormat::Raw12Packed
            | PixelFormat::Raw10Unpacked
            | PixelFormat::Raw12Unpacked => None,
            PixelFormat::Nv12
            | PixelFormat::Nv21
            | PixelFormat::P010
            | PixelFormat::P012
            | PixelFormat::I420
            | PixelFormat::Yv12 => Some(Subsampling::S420),
            PixelFormat::Nv16 | PixelFormat::Nv61 | PixelFormat::Nv20 | PixelFormat::Yuyv => {
                Some(Subsampling::S422)
            }
            PixelFormat::Nv24 | PixelFormat::Nv42 | PixelFormat::I444 => Some(Subsampling::S444),
        }
    }

    /// Chroma component order, or `None` for single-channel RAW formats.
    pub const fn chroma_order(self) -> Option<ChromaOrder> {
        match self {
            PixelFormat::Raw10Packed
            | PixelFormat::Raw12Packed
            | PixelFormat::Raw10Unpacked
            | PixelFormat::Raw12Unpacked => None,
            PixelFormat::Nv21 | PixelFormat::Nv61 | PixelFormat::Nv42 | PixelFormat::Yv12 => {
                Some(ChromaOrder::VFirst)
            }
            _ => Some(ChromaOrder::UFirst),
        }
    }

    /// Whether the format decodes to a single intensity channel.
    pub const fn is_raw(self) -> bool {
        self.subsampling().is_none()
    }

    /// Minimum bytes required to hold one luma-unit row of `width` samples.
    ///
    /// This is the quantity an explicit stride is clamped against and the
    /// derivation used when the caller passes stride 0.
    pub const fn min_row_bytes(self, width: usize) -> usize {
        match self {
            PixelFormat::Raw10Packed => width * 5 / 4,
            PixelFormat::Raw12Packed => width * 3 / 2,
            PixelFormat::Raw10Unpacked
            | PixelFormat::Raw12Unpacked
            | PixelFormat::P010
            | PixelFormat::P012
            | PixelFormat::Nv20
            | PixelFormat::Yuyv => width * 2,
            _ => width,
        }
    }

    /// Total row count implied by the plane layout, as a multiple of the
    /// image height: `(numerator, denominator)`.
    ///
    /// 4:4:4 semi-planar chroma rows are twice the luma stride, so they count
    /// as two stride units each.
    pub const fn plane_rows(self) -> (u64, u64) {
        match self {
            PixelFormat::Raw10Packed
            | PixelFormat::Raw12Packed
            | PixelFormat::Raw10Unpacked
            | PixelFormat::Raw12Unpacked
            | PixelFormat::Yuyv => (1, 1),
            PixelFormat::Nv12
            | PixelFormat::Nv21
            | PixelFormat::P010
            | PixelFormat::P012
            | PixelFormat::I420
            | PixelFormat::Yv12 => (3, 2),
            PixelFormat::Nv16 | PixelFormat::Nv61 | PixelFormat::Nv20 => (2, 1),
            PixelFormat::Nv24 | PixelFormat::Nv42 | PixelFormat::I444 => (3, 1),
        }
    }

    /// Bytes per stored sample: 2 for 16-bit-word formats, 1 otherwise.
    ///
    /// Packed RAW formats have no byte-aligned samples and report 0, the same
    /// sentinel the V4L2 world uses for packed bitstreams.
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            PixelFormat::Raw10Packed | PixelFormat::Raw12Packed => 0,
            PixelFormat::Raw10Unpacked
            | PixelFormat::Raw12Unpacked
            | PixelFormat::P010
            | PixelFormat::P012
            | PixelFormat::Nv20 => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PixelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown pixel format: {s}"))
    }
}
