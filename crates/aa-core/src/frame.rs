use std::fmt;

use crate::error::CoreError;

/// Image RGB immuable. Toute transformation (padding, tuile) produit une
/// nouvelle valeur.
///
/// Stocke les pixels en RGB row-major, 3 bytes par pixel.
///
/// # Example
/// ```
/// use aa_core::frame::Image;
/// let img = Image::filled(4, 2, (255, 255, 255));
/// assert_eq!(img.as_raw().len(), 4 * 2 * 3);
/// assert_eq!(img.pixel(3, 1), (255, 255, 255));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Image {
    /// Wrap a raw RGB buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if a dimension is zero or
    /// the buffer length is not `width * height * 3`.
    ///
    /// # Example
    /// ```
    /// use aa_core::frame::Image;
    /// assert!(Image::from_raw(1, 1, vec![0, 0, 0]).is_ok());
    /// assert!(Image::from_raw(2, 1, vec![0, 0, 0]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize * 3 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Crée une image unie.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        Self::from_fn(width, height, |_, _| rgb)
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    ///
    /// # Example
    /// ```
    /// use aa_core::frame::Image;
    /// let img = Image::from_fn(2, 2, |x, y| if x == y { (0, 0, 0) } else { (255, 255, 255) });
    /// assert_eq!(img.pixel(0, 0), (0, 0, 0));
    /// assert_eq!(img.pixel(1, 0), (255, 255, 255));
    /// ```
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> (u8, u8, u8)) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                let (r, g, b) = f(x, y);
                data.extend_from_slice(&[r, g, b]);
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes, row-major.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Accès au pixel (x, y) → (r, g, b).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        match self.data.get(idx..idx + 3) {
            Some(&[r, g, b]) => (r, g, b),
            _ => (0, 0, 0),
        }
    }
}

/// Grille de luminosité par tuile, valeurs dans [0.0, 1.0], row-major.
///
/// # Example
/// ```
/// use aa_core::frame::BrightnessGrid;
/// let grid = BrightnessGrid::new(2, 3, vec![0.0; 6]);
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.cols(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BrightnessGrid {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl BrightnessGrid {
    /// Build a grid from row-major values.
    ///
    /// # Panics
    /// Panics if `values.len() != rows * cols`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Self {
        assert_eq!(values.len(), rows * cols, "grid size mismatch");
        Self { values, rows, cols }
    }

    /// Number of tile rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of tile columns (the resolution).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Brightness of the tile at (row, col).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// One slice per tile row.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.cols.max(1)).take(self.rows)
    }

    /// All values, row-major.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Grille de caractères produite par le rendu, mêmes dimensions que la
/// grille de luminosité.
///
/// # Example
/// ```
/// use aa_core::frame::CharGrid;
/// let mut grid = CharGrid::new(2, 2);
/// grid.set(1, 0, '#');
/// assert_eq!(grid.to_string(), "  \n# \n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    cells: Vec<char>,
    rows: usize,
    cols: usize,
}

impl CharGrid {
    /// Crée une grille remplie d'espaces.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![' '; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Set the cell at (row, col).
    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, ch: char) {
        self.cells[row * self.cols + col] = ch;
    }

    /// Get the cell at (row, col).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> char {
        self.cells[row * self.cols + col]
    }

    /// One slice per row.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for &ch in row {
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Bitmap carré monochrome d'un glyphe. `true` = pixel resté blanc (non encré).
///
/// # Example
/// ```
/// use aa_core::frame::GlyphBitmap;
/// let blank = GlyphBitmap::from_fn(16, |_, _| true);
/// assert_eq!(blank.brightness(), 1.0);
/// let half = GlyphBitmap::from_fn(4, |x, _| x < 2);
/// assert_eq!(half.brightness(), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    side: u32,
    white: Vec<bool>,
}

impl GlyphBitmap {
    /// Build a `side × side` bitmap from `f(x, y) -> is_white`.
    #[must_use]
    pub fn from_fn(side: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut white = Vec::with_capacity(side as usize * side as usize);
        for y in 0..side {
            for x in 0..side {
                white.push(f(x, y));
            }
        }
        Self { side, white }
    }

    /// Side length in pixels.
    #[must_use]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Whether pixel (x, y) is white.
    #[must_use]
    pub fn is_white(&self, x: u32, y: u32) -> bool {
        self.white
            .get(y as usize * self.side as usize + x as usize)
            .copied()
            .unwrap_or(true)
    }

    /// Fraction of white pixels, in [0.0, 1.0]. An empty bitmap is white.
    #[must_use]
    pub fn brightness(&self) -> f64 {
        if self.white.is_empty() {
            return 1.0;
        }
        let lit = self.white.iter().filter(|&&w| w).count();
        lit as f64 / self.white.len() as f64
    }
}
