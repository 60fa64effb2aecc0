/// BT.709 red weight.
pub const LUMA_RED: f64 = 0.2126;
/// BT.709 green weight.
pub const LUMA_GREEN: f64 = 0.7152;
/// BT.709 blue weight.
pub const LUMA_BLUE: f64 = 0.0722;
/// Maximum value of one 8-bit channel.
pub const MAX_CHANNEL: f64 = 255.0;

/// Luminance perceptuelle BT.709, sur l'échelle [0.0, 255.0].
///
/// # Example
/// ```
/// use aa_core::color::luminance;
/// assert_eq!(luminance(0, 0, 0), 0.0);
/// assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-9);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    f64::from(r) * LUMA_RED + f64::from(g) * LUMA_GREEN + f64::from(b) * LUMA_BLUE
}
