use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Côté par défaut du bitmap de glyphe, en pixels.
pub const DEFAULT_GLYPH_SIDE: u32 = 16;

/// Résolution par défaut (colonnes de caractères).
pub const DEFAULT_RESOLUTION: u32 = 128;

/// Configuration complète d'une session de rendu.
///
/// Construite depuis les sections TOML optionnelles. Chaque champ a une
/// valeur par défaut saine.
///
/// # Example
/// ```
/// use aa_core::config::{ArtConfig, OutputKind};
/// let config = ArtConfig::default();
/// assert_eq!(config.resolution, 128);
/// assert_eq!(config.charset, "0123456789");
/// assert_eq!(config.output, OutputKind::Console);
/// ```
#[derive(Clone, Debug)]
pub struct ArtConfig {
    // === Source ===
    /// Image chargée au démarrage.
    pub image: PathBuf,
    /// Nombre de colonnes de caractères.
    pub resolution: u32,
    /// Charset initial (l'ordre et les doublons sont ignorés).
    pub charset: String,

    // === Glyphes ===
    /// Police TTF/OTF pour mesurer les glyphes. `None` = police bitmap intégrée.
    pub font_path: Option<PathBuf>,
    /// Côté du bitmap de glyphe en pixels.
    pub glyph_side: u32,

    // === Sortie ===
    /// Destination du rendu.
    pub output: OutputKind,
    /// Fichier écrit par la sortie HTML.
    pub html_path: PathBuf,
    /// Famille de police déclarée dans le HTML.
    pub html_font: String,
}

/// Output destination.
///
/// # Example
/// ```
/// use aa_core::config::OutputKind;
/// assert_eq!("html".parse::<OutputKind>().ok(), Some(OutputKind::Html));
/// assert!("pdf".parse::<OutputKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Plain text on stdout.
    #[default]
    Console,
    /// Styled HTML document on disk.
    Html,
}

impl std::str::FromStr for OutputKind {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(Self::Console),
            "html" => Ok(Self::Html),
            other => Err(crate::error::CoreError::Config(format!(
                "sortie inconnue '{other}' (console | html)"
            ))),
        }
    }
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            image: PathBuf::from("cat.jpeg"),
            resolution: DEFAULT_RESOLUTION,
            charset: crate::charset::CHARSET_DIGITS.to_string(),
            font_path: None,
            glyph_side: DEFAULT_GLYPH_SIDE,
            output: OutputKind::Console,
            html_path: PathBuf::from("out.html"),
            html_font: "Courier New".to_string(),
        }
    }
}

impl ArtConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.resolution = self.resolution.max(1);
        self.glyph_side = self.glyph_side.clamp(4, 128);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    art: Option<ArtSection>,
    glyph: Option<GlyphSection>,
    output: Option<OutputSection>,
}

/// Art section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct ArtSection {
    image: Option<PathBuf>,
    resolution: Option<u32>,
    charset: Option<String>,
}

#[derive(Deserialize)]
struct GlyphSection {
    font_path: Option<PathBuf>,
    side: Option<u32>,
}

#[derive(Deserialize)]
struct OutputSection {
    kind: Option<OutputKind>,
    html_path: Option<PathBuf>,
    html_font: Option<String>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use aa_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ArtConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use aa_core::config::parse_config;
/// let config = parse_config("[art]\nresolution = 64\n").unwrap();
/// assert_eq!(config.resolution, 64);
/// assert_eq!(config.glyph_side, 16);
/// ```
pub fn parse_config(content: &str) -> Result<ArtConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = ArtConfig::default();

    if let Some(a) = file.art {
        if let Some(v) = a.image {
            config.image = v;
        }
        if let Some(v) = a.resolution {
            config.resolution = v;
        }
        if let Some(v) = a.charset {
            config.charset = v;
        }
    }
    if let Some(g) = file.glyph {
        if g.font_path.is_some() {
            config.font_path = g.font_path;
        }
        if let Some(v) = g.side {
            config.glyph_side = v;
        }
    }
    if let Some(o) = file.output {
        if let Some(v) = o.kind {
            config.output = v;
        }
        if let Some(v) = o.html_path {
            config.html_path = v;
        }
        if let Some(v) = o.html_font {
            config.html_font = v;
        }
    }

    config.clamp_all();
    log::debug!("Config résolue : {config:?}");
    Ok(config)
}
