use crate::frame::{CharGrid, GlyphBitmap};

/// Rend un caractère en bitmap monochrome carré.
///
/// Implémenté par : `BuiltinGlyphs`, `FontGlyphs`.
/// Doit être déterministe pour un caractère et une configuration donnés.
///
/// # Example
/// ```
/// use aa_core::traits::GlyphSource;
/// use aa_core::frame::GlyphBitmap;
///
/// struct Blank;
/// impl GlyphSource for Blank {
///     fn render(&self, _c: char) -> GlyphBitmap { GlyphBitmap::from_fn(16, |_, _| true) }
/// }
/// assert_eq!(Blank.brightness(' '), 1.0);
/// ```
pub trait GlyphSource: Send + Sync {
    /// Rend `c` dans un bitmap `side × side`.
    fn render(&self, c: char) -> GlyphBitmap;

    /// Luminosité brute : fraction de pixels blancs du glyphe.
    fn brightness(&self, c: char) -> f64 {
        self.render(c).brightness()
    }
}

/// Destination d'une grille de caractères (console, fichier HTML...).
///
/// # Example
/// ```
/// use aa_core::traits::AsciiOutput;
/// use aa_core::frame::CharGrid;
///
/// struct Discard;
/// impl AsciiOutput for Discard {
///     fn out(&mut self, _art: &CharGrid) -> anyhow::Result<()> { Ok(()) }
///     fn name(&self) -> &'static str { "discard" }
/// }
/// ```
pub trait AsciiOutput {
    /// Écrit la grille vers la destination.
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written.
    fn out(&mut self, art: &CharGrid) -> anyhow::Result<()>;

    /// Nom lisible pour les logs.
    fn name(&self) -> &'static str;
}
