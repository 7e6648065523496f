#![doc = include_str!("../README.md")]

pub mod format;
pub mod geometry;
pub mod image;

pub mod prelude {
    pub use crate::{
        format::{ChromaOrder, ColorSpace, PixelFormat, Subsampling},
        geometry::BufferGeometry,
        image::{Channels, DecodedImage},
    };
}
