//! The closed catalogue mapping format identifiers to decode functions.

use rawlake_core::prelude::{BufferGeometry, ColorSpace, DecodedImage, PixelFormat};

use crate::{DecodeError, decoder};

/// Signature every registered decoder implements.
pub type DecodeFn = fn(&[u8], BufferGeometry, ColorSpace) -> Result<DecodedImage, DecodeError>;

/// One registry row: a format and its decoder.
pub struct RegistryEntry {
    /// The format this entry decodes.
    pub format: PixelFormat,
    /// The decode function.
    pub decode: DecodeFn,
}

impl RegistryEntry {
    /// The entry's lookup key.
    pub fn name(&self) -> &'static str {
        self.format.display_name()
    }
}

// Must stay in `PixelFormat::ALL` order; `entry_for` indexes by discriminant.
static ENTRIES: [RegistryEntry; 17] = [
    RegistryEntry {
        format: PixelFormat::Raw10Packed,
        decode: decoder::raw10::decode,
    },
    RegistryEntry {
        format: PixelFormat::Raw12Packed,
        decode: decoder::raw12::decode,
    },
    RegistryEntry {
        format: PixelFormat::Raw10Unpacked,
        decode: decoder::raw16::decode_raw10,
    },
    RegistryEntry {
        format: PixelFormat::Raw12Unpacked,
        decode: decoder::raw16::decode_raw12,
    },
    RegistryEntry {
        format: PixelFormat::Nv12,
        decode: decoder::nv::decode_nv12,
    },
    RegistryEntry {
        format: PixelFormat::Nv21,
        decode: decoder::nv::decode_nv21,
    },
    RegistryEntry {
        format: PixelFormat::P010,
        decode: decoder::nv::decode_p010,
    },
    RegistryEntry {
        format: PixelFormat::P012,
        decode: decoder::nv::decode_p012,
    },
    RegistryEntry {
        format: PixelFormat::Nv16,
        decode: decoder::nv::decode_nv16,
    },
    RegistryEntry {
        format: PixelFormat::Nv61,
        decode: decoder::nv::decode_nv61,
    },
    RegistryEntry {
        format: PixelFormat::Nv20,
        decode: decoder::nv::decode_nv20,
    },
    RegistryEntry {
        format: PixelFormat::Nv24,
        decode: decoder::nv::decode_nv24,
    },
    RegistryEntry {
        format: PixelFormat::Nv42,
        decode: decoder::nv::decode_nv42,
    },
    RegistryEntry {
        format: PixelFormat::I420,
        decode: decoder::planar::decode_i420,
    },
    RegistryEntry {
        format: PixelFormat::Yv12,
        decode: decoder::planar::decode_yv12,
    },
    RegistryEntry {
        format: PixelFormat::I444,
        decode: decoder::planar::decode_i444,
    },
    RegistryEntry {
        format: PixelFormat::Yuyv,
        decode: decoder::yuyv::decode,
    },
];

/// All registered entries, in [`PixelFormat::ALL`] order.
pub fn entries() -> &'static [RegistryEntry] {
    &ENTRIES
}

/// The entry for a known format. Infallible: the catalogue is closed and
/// total over [`PixelFormat`].
pub fn entry_for(format: PixelFormat) -> &'static RegistryEntry {
    &ENTRIES[format as usize]
}

/// Case-insensitive lookup by display name, via the catalogue itself so the
/// accepted names cannot drift from [`PixelFormat::from_name`].
pub fn lookup(name: &str) -> Result<&'static RegistryEntry, DecodeError> {
    PixelFormat::from_name(name)
        .map(entry_for)
        .ok_or_else(|| DecodeError::UnsupportedFormat(name.to_string()))
}

/// Display names of every supported format, in registry order.
pub fn display_names() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|e| e.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_match_discriminant_order() {
        for (i, format) in PixelFormat::ALL.into_iter().enumerate() {
            assert_eq!(ENTRIES[i].format, format);
            assert_eq!(format as usize, i);
            assert!(std::ptr::eq(entry_for(format), &ENTRIES[i]));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("yuyv").unwrap().format, PixelFormat::Yuyv);
        assert_eq!(lookup("Raw10").unwrap().format, PixelFormat::Raw10Packed);
        assert!(matches!(
            lookup("RAW14"),
            Err(DecodeError::UnsupportedFormat(name)) if name == "RAW14"
        ));
    }

    #[test]
    fn lookup_agrees_with_the_catalogue() {
        for format in PixelFormat::ALL {
            assert_eq!(lookup(format.display_name()).unwrap().format, format);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = display_names().map(str::to_ascii_uppercase).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ENTRIES.len());
    }
}
