/// Glyph sources for ascii-art.
///
/// Render a character into a square monochrome bitmap whose white
/// fraction is the character's raw brightness.

pub mod builtin;
pub mod font;

pub use builtin::BuiltinGlyphs;
pub use font::FontGlyphs;

use std::path::Path;
use std::sync::Arc;

use aa_core::traits::GlyphSource;

/// Choose the glyph source for a configuration: a TTF/OTF file when one is
/// given, the embedded bitmap font otherwise.
///
/// # Errors
/// Returns an error if `font_path` is set and the font cannot be loaded.
///
/// # Example
/// ```
/// use aa_core::traits::GlyphSource;
/// use aa_glyph::glyph_source;
/// let glyphs = glyph_source(None, 16).unwrap();
/// assert_eq!(glyphs.render('A').side(), 16);
/// ```
pub fn glyph_source(font_path: Option<&Path>, side: u32) -> anyhow::Result<Arc<dyn GlyphSource>> {
    match font_path {
        Some(path) => {
            log::info!("Glyphes mesurés depuis {}", path.display());
            Ok(Arc::new(FontGlyphs::from_file(path, side)?))
        }
        None => Ok(Arc::new(BuiltinGlyphs::new(side))),
    }
}
