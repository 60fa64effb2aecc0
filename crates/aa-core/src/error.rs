use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Referenced file does not exist.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// The file exists but could not be decoded as an image.
    #[error("Image illisible : {path} ({reason})")]
    ImageDecode {
        /// Path of the offending file.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Column count outside `[1, max]` for the padded image.
    #[error("Résolution invalide : {resolution} (bornes 1..={max})")]
    InvalidResolution {
        /// Requested number of columns.
        resolution: u32,
        /// Padded image width.
        max: u32,
    },

    /// Matching was attempted with no characters available.
    #[error("Aucun caractère disponible : le charset est vide")]
    EmptyCharset,
}

impl CoreError {
    /// True for the error kinds produced by image I/O.
    ///
    /// # Example
    /// ```
    /// use aa_core::CoreError;
    /// assert!(CoreError::FileNotFound { path: "x.png".into() }.is_io());
    /// assert!(!CoreError::EmptyCharset.is_io());
    /// ```
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::ImageDecode { .. })
    }
}
