/// Image decoding for ascii-art.

pub mod image;

pub use crate::image::load_image;
