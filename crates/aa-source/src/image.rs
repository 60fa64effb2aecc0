use std::path::Path;

use aa_core::error::CoreError;
use aa_core::frame::Image;
use image::ImageError;

/// Charge une image depuis le disque et la convertit en RGB 8 bits.
///
/// L'alpha éventuel est ignoré.
///
/// # Errors
/// Returns [`CoreError::FileNotFound`] if the path does not exist and
/// [`CoreError::ImageDecode`] if it cannot be decoded.
///
/// # Example
/// ```no_run
/// use aa_source::load_image;
/// use std::path::Path;
/// let img = load_image(Path::new("cat.jpeg")).unwrap();
/// assert!(img.width() > 0);
/// ```
pub fn load_image(path: &Path) -> Result<Image, CoreError> {
    let display = path.display().to_string();
    let decoded = image::open(path).map_err(|e| match e {
        ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            CoreError::FileNotFound {
                path: display.clone(),
            }
        }
        other => CoreError::ImageDecode {
            path: display.clone(),
            reason: other.to_string(),
        },
    })?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::info!("Image chargée : {display} ({width}×{height})");
    Image::from_raw(width, height, rgb.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_not_found() {
        let err = load_image(Path::new("/nonexistent/cat.jpeg")).unwrap_err();
        assert!(matches!(err, CoreError::FileNotFound { .. }));
        assert!(err.is_io());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"definitely not a png").unwrap();
        let err = load_image(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::ImageDecode { .. }), "{err:?}");
    }

    #[test]
    fn png_roundtrip_keeps_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        let buf = image::RgbImage::from_fn(3, 2, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([0, 0, 0])
            } else {
                image::Rgb([255, 255, 255])
            }
        });
        buf.save(&path).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.pixel(0, 0), (0, 0, 0));
        assert_eq!(img.pixel(1, 0), (255, 255, 255));
        assert_eq!(img.pixel(2, 1), (255, 255, 255));
    }
}
