/// Shared types, traits, and configuration for ascii-art.
///
/// This crate contains the image and grid types, the charset model,
/// the luminance helpers, and the configuration logic used across the
/// ascii-art workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::{Charset, CharsetKey};
pub use config::ArtConfig;
pub use error::CoreError;
pub use frame::{BrightnessGrid, CharGrid, GlyphBitmap, Image};
