use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use aa_ascii::tiler::resolution_bounds;
use aa_ascii::{AsciiArt, BrightnessCache, CharMatcher, ImageTiler};
use aa_core::config::{ArtConfig, OutputKind};
use aa_core::error::CoreError;
use aa_core::frame::{CharGrid, Image};
use aa_core::traits::{AsciiOutput, GlyphSource};
use aa_render::{ConsoleOutput, HtmlOutput};
use anyhow::Result;

use crate::command::{self, CharSelection, Command, ResStep};
use crate::error::ShellError;

/// Invite affichée avant chaque lecture.
pub const PROMPT: &str = ">>> ";

/// Boucle interactive : lit une commande par ligne sur `input`, écrit
/// messages et rendus console sur `out`.
///
/// Le tiler n'est reconstruit qu'après un changement d'image ou de
/// résolution ; le matcher garde ses luminosités entre deux rendus.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use aa_app::Shell;
/// use aa_core::config::ArtConfig;
/// use aa_core::frame::Image;
/// use aa_glyph::BuiltinGlyphs;
///
/// let image = Image::filled(8, 8, (255, 255, 255));
/// let mut out = Vec::new();
/// let mut shell = Shell::new(
///     ArtConfig::default(),
///     image,
///     Arc::new(BuiltinGlyphs::default()),
///     "res down\nexit\n".as_bytes(),
///     &mut out,
/// );
/// shell.run().unwrap();
/// drop(shell);
/// assert_eq!(String::from_utf8(out).unwrap(), ">>> Resolution set to 4.\n>>> ");
/// ```
pub struct Shell<R: BufRead, W: Write> {
    input: R,
    out: W,
    image: Image,
    resolution: u32,
    matcher: CharMatcher,
    tiler: Option<ImageTiler>,
    output: OutputKind,
    html: HtmlOutput,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Build a shell over `image` with the charset, resolution and sink of
    /// `config`. A resolution outside the image bounds is clamped.
    pub fn new(
        config: ArtConfig,
        image: Image,
        glyphs: Arc<dyn GlyphSource>,
        input: R,
        out: W,
    ) -> Self {
        let resolution = clamp_resolution(config.resolution, &image);
        let matcher = CharMatcher::new(config.charset.chars(), glyphs, BrightnessCache::new());
        let html = HtmlOutput::new(&config.html_path, &config.html_font);
        Self {
            input,
            out,
            output: config.output,
            image,
            resolution,
            matcher,
            tiler: None,
            html,
        }
    }

    /// Current number of character columns.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Current sink.
    #[must_use]
    pub fn output(&self) -> OutputKind {
        self.output
    }

    /// Current charset, ascending.
    pub fn charset(&self) -> impl Iterator<Item = char> + '_ {
        self.matcher.charset().iter()
    }

    /// Lit et exécute des commandes jusqu'à `exit` ou la fin de l'entrée.
    ///
    /// # Errors
    /// Returns an error only if reading `input` or writing `out` fails;
    /// rejected commands are reported on `out` and the loop goes on.
    pub fn run(&mut self) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                log::debug!("Fin de l'entrée, sortie du shell");
                return Ok(());
            }
            let line = line.trim_end_matches(['\n', '\r']);

            let result = match command::parse(line) {
                Ok(Command::Exit) => return Ok(()),
                Ok(cmd) => self.execute(cmd),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => {}
                Err(ShellError::Io(e)) => return Err(e.into()),
                Err(e) => {
                    log::debug!("Commande rejetée {line:?} : {e}");
                    writeln!(self.out, "{e}")?;
                }
            }
        }
    }

    /// Exécute une commande déjà analysée.
    ///
    /// `Exit` n'a aucun effet ici : seul [`Shell::run`] termine la boucle.
    ///
    /// # Errors
    /// Returns the [`ShellError`] describing why the command was refused.
    pub fn execute(&mut self, command: Command) -> Result<(), ShellError> {
        match command {
            Command::Exit => Ok(()),
            Command::Chars => self.show_chars(),
            Command::Add(selection) => {
                self.add(selection);
                Ok(())
            }
            Command::Remove(selection) => {
                self.remove(selection);
                Ok(())
            }
            Command::Res(step) => self.change_resolution(step),
            Command::Image(path) => self.change_image(&path),
            Command::Output(kind) => {
                self.output = kind;
                log::info!("Sortie : {kind:?}");
                Ok(())
            }
            Command::AsciiArt => self.render(),
        }
    }

    fn show_chars(&mut self) -> Result<(), ShellError> {
        for c in self.matcher.charset().iter() {
            write!(self.out, "{c} ")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn add(&mut self, selection: CharSelection) {
        for c in selection.chars() {
            self.matcher.add_char(c);
        }
    }

    fn remove(&mut self, selection: CharSelection) {
        for c in selection.chars() {
            self.matcher.remove_char(c);
        }
    }

    fn change_resolution(&mut self, step: ResStep) -> Result<(), ShellError> {
        let bounds = resolution_bounds(self.image.width(), self.image.height());
        let next = match step {
            ResStep::Up => self.resolution.checked_mul(2),
            ResStep::Down => Some(self.resolution / 2),
        };
        match next {
            Some(next) if bounds.contains(&next) => {
                self.resolution = next;
                self.tiler = None;
                log::info!("Résolution : {next}");
                writeln!(self.out, "Resolution set to {next}.")?;
                Ok(())
            }
            _ => Err(ShellError::ResolutionBounds),
        }
    }

    fn change_image(&mut self, path: &Path) -> Result<(), ShellError> {
        let image = aa_source::load_image(path).map_err(|e| {
            if e.is_io() {
                log::warn!("Image refusée : {e}");
            } else {
                log::error!("Chargement d'image : {e}");
            }
            ShellError::ImageFile
        })?;
        self.resolution = clamp_resolution(self.resolution, &image);
        self.image = image;
        self.tiler = None;
        Ok(())
    }

    fn render(&mut self) -> Result<(), ShellError> {
        if self.matcher.charset().is_empty() {
            return Err(ShellError::EmptyCharset);
        }
        let tiler = match self.tiler.take() {
            Some(tiler) => tiler,
            None => ImageTiler::new(&self.image, self.resolution)?,
        };
        let art = AsciiArt::new(&mut self.matcher, &tiler)
            .run()
            .map_err(|e| match e {
                CoreError::EmptyCharset => ShellError::EmptyCharset,
                other => ShellError::Core(other),
            });
        self.tiler = Some(tiler);
        self.emit(&art?)
    }

    fn emit(&mut self, art: &CharGrid) -> Result<(), ShellError> {
        let written = match self.output {
            OutputKind::Console => ConsoleOutput::new(&mut self.out).out(art),
            OutputKind::Html => self.html.out(art),
        };
        written.map_err(|e| {
            log::warn!("Échec de la sortie {:?} : {e:#}", self.output);
            ShellError::Output(e)
        })
    }
}

/// Ramène `resolution` dans les bornes de `image`, avec un avertissement
/// si elle change.
#[must_use]
pub fn clamp_resolution(resolution: u32, image: &Image) -> u32 {
    let bounds = resolution_bounds(image.width(), image.height());
    let clamped = resolution.clamp(*bounds.start(), *bounds.end());
    if clamped != resolution {
        log::warn!(
            "Résolution {resolution} hors bornes {}..={} pour {}×{}, ramenée à {clamped}",
            bounds.start(),
            bounds.end(),
            image.width(),
            image.height()
        );
    }
    clamped
}

/// Un seul rendu vers la sortie configurée, sans shell.
///
/// # Errors
/// Returns an error if the charset is empty or the sink cannot be written.
pub fn render_once(config: &ArtConfig, image: &Image, glyphs: Arc<dyn GlyphSource>) -> Result<()> {
    let resolution = clamp_resolution(config.resolution, image);
    let tiler = ImageTiler::new(image, resolution)?;
    let mut matcher = CharMatcher::new(config.charset.chars(), glyphs, BrightnessCache::new());
    let art = AsciiArt::new(&mut matcher, &tiler).run()?;
    let mut sink = aa_render::output_for(config.output, config);
    sink.out(&art)?;
    log::info!("Rendu unique envoyé vers {}", sink.name());
    Ok(())
}
