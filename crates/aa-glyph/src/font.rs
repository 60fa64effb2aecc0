use std::path::Path;

use aa_core::frame::GlyphBitmap;
use aa_core::traits::GlyphSource;
use ab_glyph::{Font, FontVec, PxScale, point};
use anyhow::{Context, Result};

/// Position horizontale du stylo, en fraction du côté.
const X_OFFSET_FACTOR: f32 = 0.2;
/// Position de la ligne de base, en fraction du côté.
const Y_OFFSET_FACTOR: f32 = 0.75;
/// Couverture à partir de laquelle un pixel compte comme encré.
const INK_COVERAGE: f32 = 0.5;

/// Mesure les glyphes d'une police TTF/OTF via `ab_glyph`.
///
/// Chaque caractère est dessiné à la taille `side` px dans un carré
/// `side × side`, stylo en (0.2·side, 0.75·side).
///
/// # Example
/// ```no_run
/// use aa_core::traits::GlyphSource;
/// use aa_glyph::FontGlyphs;
/// use std::path::Path;
/// let glyphs = FontGlyphs::from_file(Path::new("fonts/cour.ttf"), 16).unwrap();
/// let _ = glyphs.brightness('A');
/// ```
pub struct FontGlyphs {
    font: FontVec,
    side: u32,
}

impl FontGlyphs {
    /// Load a font file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid font.
    pub fn from_file(path: &Path, side: u32) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Impossible de lire la police {}", path.display()))?;
        Self::from_bytes(data, side)
            .with_context(|| format!("Police invalide : {}", path.display()))
    }

    /// Build from in-memory font data.
    ///
    /// # Errors
    /// Returns an error if the bytes are not a valid TTF/OTF font.
    pub fn from_bytes(data: Vec<u8>, side: u32) -> Result<Self> {
        let font = FontVec::try_from_vec(data)?;
        Ok(Self {
            font,
            side: side.max(1),
        })
    }
}

impl GlyphSource for FontGlyphs {
    fn render(&self, c: char) -> GlyphBitmap {
        let side = self.side;
        let side_f = side as f32;
        let mut ink = vec![false; side as usize * side as usize];

        let gid = self.font.glyph_id(c);
        if gid.0 == 0 && !c.is_whitespace() {
            log::warn!("Glyphe absent de la police pour {c:?}, rendu .notdef");
        }

        let pen = point(
            (side_f * X_OFFSET_FACTOR).round(),
            (side_f * Y_OFFSET_FACTOR).round(),
        );
        let glyph = gid.with_scale_and_position(PxScale::from(side_f), pen);

        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            #[allow(clippy::cast_possible_wrap)]
            outline.draw(|x, y, v| {
                let px = x as i32 + bounds.min.x as i32;
                let py = y as i32 + bounds.min.y as i32;
                if v >= INK_COVERAGE && px >= 0 && py >= 0 {
                    let (px, py) = (px as u32, py as u32);
                    if px < side && py < side {
                        ink[(py * side + px) as usize] = true;
                    }
                }
            });
        }

        GlyphBitmap::from_fn(side, |x, y| !ink[(y * side + x) as usize])
    }
}
