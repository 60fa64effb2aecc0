use std::path::PathBuf;

use aa_core::config::{ArtConfig, OutputKind, load_config};
use anyhow::Result;
use clap::Parser;

/// ascii-art : convertit une image en art ASCII, en interactif ou en un seul rendu.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF). Défaut : valeur de la config.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Fichier de configuration TOML.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Nombre de caractères par ligne.
    #[arg(short, long)]
    pub resolution: Option<u32>,

    /// Charset initial, ex. "0123456789" ou " .:-=+*#%@".
    #[arg(long)]
    pub charset: Option<String>,

    /// Sortie : console ou html.
    #[arg(long)]
    pub output: Option<OutputKind>,

    /// Police TTF/OTF pour mesurer les glyphes (défaut : police bitmap intégrée).
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Un seul rendu vers la sortie, sans shell interactif.
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Charge la config (ou les défauts si le fichier manque) puis applique
    /// les options de la ligne de commande.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn resolve_config(&self) -> Result<ArtConfig> {
        let mut config = if self.config.exists() {
            load_config(&self.config)?
        } else {
            log::warn!(
                "Config introuvable : {}. Utilisation des défauts.",
                self.config.display()
            );
            ArtConfig::default()
        };

        if let Some(ref image) = self.image {
            config.image.clone_from(image);
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(ref charset) = self.charset {
            config.charset.clone_from(charset);
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(ref font) = self.font {
            config.font_path = Some(font.clone());
        }
        config.clamp_all();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "ascii-art",
            "--image",
            "board.png",
            "-r",
            "64",
            "--output",
            "html",
            "--once",
        ]);
        assert_eq!(cli.image, Some(PathBuf::from("board.png")));
        assert_eq!(cli.resolution, Some(64));
        assert_eq!(cli.output, Some(OutputKind::Html));
        assert!(cli.once);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn unknown_output_is_rejected() {
        assert!(Cli::try_parse_from(["ascii-art", "--output", "pdf"]).is_err());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let cli = Cli::parse_from(["ascii-art", "--config", "/nonexistent/art.toml"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.resolution, ArtConfig::default().resolution);
        assert_eq!(config.charset, "0123456789");
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[art]\nresolution = 32\ncharset = \"ab\"").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli = Cli::parse_from(["ascii-art", "--config", &path, "--charset", "xyz"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.resolution, 32);
        assert_eq!(config.charset, "xyz");
    }

    #[test]
    fn zero_resolution_is_clamped() {
        let cli = Cli::parse_from(["ascii-art", "--config", "/nonexistent/art.toml", "-r", "0"]);
        assert_eq!(cli.resolve_config().unwrap().resolution, 1);
    }
}
