//! Brightness-to-character engine for ascii-art.
//!
//! Tiles a padded image into a brightness grid, then maps every cell to
//! the charset member of nearest normalized brightness.

pub mod algorithm;
pub mod cache;
pub mod matcher;
pub mod tiler;

pub use algorithm::AsciiArt;
pub use cache::BrightnessCache;
pub use matcher::{CharMatcher, RefreshPath, Staleness};
pub use tiler::ImageTiler;
