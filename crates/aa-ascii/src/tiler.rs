use std::ops::RangeInclusive;

use aa_core::color::{MAX_CHANNEL, luminance};
use aa_core::error::CoreError;
use aa_core::frame::{BrightnessGrid, Image};

/// Couleur des bordures ajoutées par le padding.
const PAD_COLOR: (u8, u8, u8) = (255, 255, 255);

/// Smallest power of two `>= n`; powers of two are returned unchanged.
///
/// # Example
/// ```
/// use aa_ascii::tiler::next_power_of_two;
/// assert_eq!(next_power_of_two(64), 64);
/// assert_eq!(next_power_of_two(65), 128);
/// assert_eq!(next_power_of_two(1), 1);
/// ```
#[must_use]
pub fn next_power_of_two(n: u32) -> u32 {
    n.next_power_of_two()
}

/// Dimensions de l'image une fois paddée.
#[must_use]
pub fn padded_dimensions(width: u32, height: u32) -> (u32, u32) {
    (next_power_of_two(width), next_power_of_two(height))
}

/// Valid column counts for an image: `[max(1, W/H), W]` on padded dimensions.
///
/// # Example
/// ```
/// use aa_ascii::tiler::resolution_bounds;
/// assert_eq!(resolution_bounds(300, 100), 4..=512);
/// assert_eq!(resolution_bounds(100, 300), 1..=128);
/// ```
#[must_use]
pub fn resolution_bounds(width: u32, height: u32) -> RangeInclusive<u32> {
    let (w, h) = padded_dimensions(width, height);
    (w / h).max(1)..=w
}

/// Centre `image` dans un canevas blanc aux dimensions puissances de deux.
///
/// Le padding vaut `(new - old) / 2` à gauche et en haut ; le reste de la
/// division entière va à droite et en bas.
///
/// # Example
/// ```
/// use aa_core::frame::Image;
/// use aa_ascii::tiler::pad_to_power_of_two;
/// let padded = pad_to_power_of_two(&Image::filled(3, 1, (0, 0, 0)));
/// assert_eq!((padded.width(), padded.height()), (4, 1));
/// assert_eq!(padded.pixel(3, 0), (255, 255, 255));
/// ```
#[must_use]
pub fn pad_to_power_of_two(image: &Image) -> Image {
    let (width, height) = (image.width(), image.height());
    let (new_w, new_h) = padded_dimensions(width, height);
    if (new_w, new_h) == (width, height) {
        return image.clone();
    }
    let pad_x = (new_w - width) / 2;
    let pad_y = (new_h - height) / 2;
    Image::from_fn(new_w, new_h, |x, y| {
        let inside = (pad_x..pad_x + width).contains(&x) && (pad_y..pad_y + height).contains(&y);
        if inside {
            image.pixel(x - pad_x, y - pad_y)
        } else {
            PAD_COLOR
        }
    })
}

/// One square tile of the padded image, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Tile row in the grid.
    pub row: usize,
    /// Tile column in the grid.
    pub col: usize,
    /// Left pixel.
    pub x: u32,
    /// Top pixel.
    pub y: u32,
    /// Side length in pixels.
    pub size: u32,
}

/// Découpe une image paddée en tuiles carrées et calcule leur luminosité.
///
/// Immuable : changer d'image ou de résolution impose un nouveau tiler.
///
/// # Example
/// ```
/// use aa_core::frame::Image;
/// use aa_ascii::ImageTiler;
/// let tiler = ImageTiler::new(&Image::filled(8, 4, (0, 0, 0)), 4).unwrap();
/// assert_eq!(tiler.tile_size(), 2);
/// assert_eq!((tiler.brightness().rows(), tiler.brightness().cols()), (2, 4));
/// ```
#[derive(Clone, Debug)]
pub struct ImageTiler {
    padded_width: u32,
    padded_height: u32,
    resolution: u32,
    tile_size: u32,
    brightness: BrightnessGrid,
}

impl ImageTiler {
    /// Pad `image`, tile it into `resolution` columns and measure every tile.
    ///
    /// Tile side is `paddedWidth / resolution` (integer division), and the
    /// grid has `paddedHeight / side` rows. When the resolution does not
    /// divide the width, the rightmost leftover columns are not covered.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidResolution`] unless
    /// `1 <= resolution <= paddedWidth`.
    pub fn new(image: &Image, resolution: u32) -> Result<Self, CoreError> {
        let (padded_width, padded_height) = padded_dimensions(image.width(), image.height());
        if resolution == 0 || resolution > padded_width {
            return Err(CoreError::InvalidResolution {
                resolution,
                max: padded_width,
            });
        }

        let padded = pad_to_power_of_two(image);
        let tile_size = padded_width / resolution;
        let rows = (padded_height / tile_size) as usize;
        let cols = resolution as usize;

        let mut values = Vec::with_capacity(rows * cols);
        for tile in tiles(rows, cols, tile_size) {
            values.push(tile_brightness(&padded, &tile));
        }
        log::debug!(
            "Tiler : {padded_width}×{padded_height} paddé, {rows}×{cols} tuiles de {tile_size}px"
        );

        Ok(Self {
            padded_width,
            padded_height,
            resolution,
            tile_size,
            brightness: BrightnessGrid::new(rows, cols, values),
        })
    }

    /// Per-tile brightness, `rows × resolution`.
    #[must_use]
    pub fn brightness(&self) -> &BrightnessGrid {
        &self.brightness
    }

    /// Width after padding.
    #[must_use]
    pub fn padded_width(&self) -> u32 {
        self.padded_width
    }

    /// Height after padding.
    #[must_use]
    pub fn padded_height(&self) -> u32 {
        self.padded_height
    }

    /// Number of character columns.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Tile side in pixels.
    #[must_use]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Tiles in raster order, from the top-left.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        tiles(
            self.brightness.rows(),
            self.brightness.cols(),
            self.tile_size,
        )
    }
}

fn tiles(rows: usize, cols: usize, size: u32) -> impl Iterator<Item = Tile> {
    (0..rows).flat_map(move |row| {
        (0..cols).map(move |col| Tile {
            row,
            col,
            x: col as u32 * size,
            y: row as u32 * size,
            size,
        })
    })
}

/// Moyenne de la luminance BT.709 d'une tuile, ramenée dans [0.0, 1.0].
fn tile_brightness(image: &Image, tile: &Tile) -> f64 {
    let mut sum = 0.0;
    for y in tile.y..tile.y + tile.size {
        for x in tile.x..tile.x + tile.size {
            let (r, g, b) = image.pixel(x, y);
            sum += luminance(r, g, b);
        }
    }
    let area = f64::from(tile.size) * f64::from(tile.size);
    (sum / (area * MAX_CHANNEL)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: (u8, u8, u8) = (0, 0, 0);
    const WHITE: (u8, u8, u8) = (255, 255, 255);

    #[test]
    fn next_power_of_two_properties() {
        for n in 1..=1030u32 {
            let p = next_power_of_two(n);
            assert!(p.is_power_of_two());
            assert!(p >= n);
            assert!(p / 2 < n, "{p} n'est pas la plus petite pour {n}");
            if n.is_power_of_two() {
                assert_eq!(p, n);
            }
        }
    }

    #[test]
    fn padding_centers_with_remainder_bottom_right() {
        let padded = pad_to_power_of_two(&Image::filled(5, 3, BLACK));
        assert_eq!((padded.width(), padded.height()), (8, 4));
        // (8 - 5) / 2 = 1 column on the left, 2 on the right.
        assert_eq!(padded.pixel(0, 0), WHITE);
        assert_eq!(padded.pixel(1, 0), BLACK);
        assert_eq!(padded.pixel(5, 2), BLACK);
        assert_eq!(padded.pixel(6, 0), WHITE);
        assert_eq!(padded.pixel(7, 0), WHITE);
        // (4 - 3) / 2 = 0 rows on top, 1 at the bottom.
        assert_eq!(padded.pixel(3, 3), WHITE);
    }

    #[test]
    fn power_of_two_image_is_untouched() {
        let img = Image::from_fn(4, 2, |x, _| (x as u8 * 60, 0, 0));
        assert_eq!(pad_to_power_of_two(&img), img);
    }

    #[test]
    fn tiles_cover_padded_image_exactly() {
        let img = Image::filled(100, 40, BLACK);
        for resolution in [2, 4, 8, 16, 32, 64, 128] {
            let tiler = ImageTiler::new(&img, resolution).unwrap();
            let (w, h) = (tiler.padded_width(), tiler.padded_height());
            let mut hits = vec![0u8; (w * h) as usize];
            let mut count = 0;
            for tile in tiler.tiles() {
                count += 1;
                for y in tile.y..tile.y + tile.size {
                    for x in tile.x..tile.x + tile.size {
                        hits[(y * w + x) as usize] += 1;
                    }
                }
            }
            let s = tiler.tile_size();
            assert_eq!(count, (h / s * resolution) as usize);
            assert!(hits.iter().all(|&n| n == 1), "trou ou recouvrement à {resolution}");
        }
    }

    #[test]
    fn grid_dimensions_follow_resolution() {
        let tiler = ImageTiler::new(&Image::filled(200, 50, WHITE), 16).unwrap();
        assert_eq!((tiler.padded_width(), tiler.padded_height()), (256, 64));
        assert_eq!(tiler.tile_size(), 16);
        assert_eq!(tiler.brightness().rows(), 4);
        assert_eq!(tiler.brightness().cols(), 16);
        assert_eq!(resolution_bounds(200, 50), 4..=256);
    }

    #[test]
    fn white_and_black_tiles_hit_the_bounds() {
        let img = Image::from_fn(4, 2, |x, _| if x < 2 { WHITE } else { BLACK });
        let tiler = ImageTiler::new(&img, 2).unwrap();
        let grid = tiler.brightness();
        assert!((grid.get(0, 0) - 1.0).abs() < 1e-9);
        assert_eq!(grid.get(0, 1), 0.0);
        assert!(grid.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn tile_brightness_is_mean_luminance() {
        // One 2×2 tile: two white pixels, two pure-green pixels.
        let img = Image::from_fn(2, 2, |_, y| if y == 0 { WHITE } else { (0, 255, 0) });
        let tiler = ImageTiler::new(&img, 1).unwrap();
        let expected = (2.0 * 255.0 + 2.0 * 255.0 * 0.7152) / (4.0 * 255.0);
        assert!((tiler.brightness().get(0, 0) - expected).abs() < 1e-9);
    }

    #[test]
    fn padding_counts_as_white() {
        // 3×1 black → 4×1 with one white column; a single 1-pixel-wide tile
        // per column.
        let tiler = ImageTiler::new(&Image::filled(3, 1, BLACK), 4).unwrap();
        let row: Vec<f64> = tiler.brightness().values().to_vec();
        assert_eq!(&row[..3], &[0.0, 0.0, 0.0]);
        assert!((row[3] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn non_dividing_resolution_truncates() {
        let tiler = ImageTiler::new(&Image::filled(16, 16, BLACK), 3).unwrap();
        assert_eq!(tiler.tile_size(), 5);
        assert_eq!(tiler.brightness().rows(), 3);
        assert_eq!(tiler.brightness().cols(), 3);
    }

    #[test]
    fn out_of_range_resolution_is_rejected() {
        let img = Image::filled(10, 10, BLACK);
        assert!(matches!(
            ImageTiler::new(&img, 0),
            Err(CoreError::InvalidResolution { resolution: 0, max: 16 })
        ));
        assert!(ImageTiler::new(&img, 17).is_err());
        assert!(ImageTiler::new(&img, 16).is_ok());
    }
}
