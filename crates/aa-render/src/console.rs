use std::io::{self, Stdout, Write};

use aa_core::frame::CharGrid;
use aa_core::traits::AsciiOutput;
use anyhow::{Context, Result};

/// Écrit la grille en texte brut : une ligne par rangée, caractères
/// contigus.
///
/// # Example
/// ```
/// use aa_core::frame::CharGrid;
/// use aa_core::traits::AsciiOutput;
/// use aa_render::ConsoleOutput;
///
/// let mut art = CharGrid::new(1, 2);
/// art.set(0, 0, '4');
/// art.set(0, 1, '2');
/// let mut sink = ConsoleOutput::new(Vec::new());
/// sink.out(&art).unwrap();
/// assert_eq!(sink.into_inner(), b"42\n");
/// ```
pub struct ConsoleOutput<W: Write> {
    writer: W,
}

impl ConsoleOutput<Stdout> {
    /// Sink on the process standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Récupère le writer sous-jacent.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AsciiOutput for ConsoleOutput<W> {
    fn out(&mut self, art: &CharGrid) -> Result<()> {
        write!(self.writer, "{art}").context("Écriture console impossible")?;
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_newline_terminated() {
        let mut art = CharGrid::new(2, 3);
        for (i, c) in "abcdef".chars().enumerate() {
            art.set(i / 3, i % 3, c);
        }
        let mut sink = ConsoleOutput::new(Vec::new());
        sink.out(&art).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "abc\ndef\n");
    }

    #[test]
    fn empty_grid_writes_nothing() {
        let mut sink = ConsoleOutput::new(Vec::new());
        sink.out(&CharGrid::new(0, 0)).unwrap();
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn consecutive_runs_append() {
        let mut art = CharGrid::new(1, 1);
        art.set(0, 0, '#');
        let mut sink = ConsoleOutput::new(Vec::new());
        sink.out(&art).unwrap();
        sink.out(&art).unwrap();
        assert_eq!(sink.into_inner(), b"#\n#\n");
    }
}
