use std::io;

use aa_app::cli::Cli;
use aa_app::shell::{Shell, render_once};
use anyhow::{Context, Result};
use clap::Parser;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Config fichier + overrides CLI
    let config = cli.resolve_config()?;

    // 4. Image et source de glyphes
    let image = aa_source::load_image(&config.image)
        .with_context(|| format!("Image de départ inutilisable : {}", config.image.display()))?;
    let glyphs = aa_glyph::glyph_source(config.font_path.as_deref(), config.glyph_side)?;

    if cli.once {
        return render_once(&config, &image, glyphs);
    }

    // 5. Shell interactif sur stdin/stdout
    let mut shell = Shell::new(config, image, glyphs, io::stdin().lock(), io::stdout().lock());
    shell.run()
}
