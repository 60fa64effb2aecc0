use aa_core::error::CoreError;
use aa_core::frame::CharGrid;

use crate::matcher::CharMatcher;
use crate::tiler::ImageTiler;

/// One conversion pass: tiler brightness in, character grid out.
///
/// The matcher is refreshed once per pass, never per cell.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use aa_ascii::{AsciiArt, BrightnessCache, CharMatcher, ImageTiler};
/// use aa_core::frame::Image;
/// use aa_glyph::BuiltinGlyphs;
///
/// let image = Image::filled(4, 4, (255, 255, 255));
/// let tiler = ImageTiler::new(&image, 2).unwrap();
/// let mut matcher = CharMatcher::new(" #".chars(), Arc::new(BuiltinGlyphs::default()), BrightnessCache::new());
/// let art = AsciiArt::new(&mut matcher, &tiler).run().unwrap();
/// assert_eq!(art.to_string(), "  \n  \n");
/// ```
pub struct AsciiArt<'a> {
    matcher: &'a mut CharMatcher,
    tiler: &'a ImageTiler,
}

impl<'a> AsciiArt<'a> {
    #[must_use]
    pub fn new(matcher: &'a mut CharMatcher, tiler: &'a ImageTiler) -> Self {
        Self { matcher, tiler }
    }

    /// Map every tile to its nearest character, row by row.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if the matcher has no character.
    pub fn run(self) -> Result<CharGrid, CoreError> {
        if self.matcher.charset().is_empty() {
            return Err(CoreError::EmptyCharset);
        }
        let path = self.matcher.initialize_brightness_map();

        let brightness = self.tiler.brightness();
        let mut grid = CharGrid::new(brightness.rows(), brightness.cols());
        for (row, values) in brightness.iter_rows().enumerate() {
            for (col, &b) in values.iter().enumerate() {
                grid.set(row, col, self.matcher.char_by_image_brightness(b)?);
            }
        }
        log::debug!("Rendu {}×{} ({path:?})", grid.rows(), grid.cols());
        Ok(grid)
    }
}
