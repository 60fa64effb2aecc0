/// Output sinks for ascii-art grids.
///
/// Every sink implements [`aa_core::traits::AsciiOutput`].
pub mod console;
pub mod html;

pub use console::ConsoleOutput;
pub use html::HtmlOutput;

use aa_core::config::{ArtConfig, OutputKind};
use aa_core::traits::AsciiOutput;

/// Build the sink selected by `kind`, with paths and fonts from `config`.
///
/// # Example
/// ```
/// use aa_core::config::{ArtConfig, OutputKind};
/// let sink = aa_render::output_for(OutputKind::Html, &ArtConfig::default());
/// assert_eq!(sink.name(), "html");
/// ```
#[must_use]
pub fn output_for(kind: OutputKind, config: &ArtConfig) -> Box<dyn AsciiOutput> {
    match kind {
        OutputKind::Console => Box::new(ConsoleOutput::stdout()),
        OutputKind::Html => Box::new(HtmlOutput::new(&config.html_path, &config.html_font)),
    }
}
