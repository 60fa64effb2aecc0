use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use aa_core::frame::CharGrid;
use aa_core::traits::AsciiOutput;
use anyhow::{Context, Result};

/// Taille de police dans le bloc `<pre>`, en pixels.
const FONT_SIZE_PX: u32 = 4;
/// Interligne relatif : proche de la hauteur de glyphe pour un rendu dense.
const LINE_HEIGHT_EM: f32 = 0.6;
/// Espacement horizontal pour compenser des glyphes plus hauts que larges.
const LETTER_SPACING_EM: f32 = 0.2;

/// Écrit la grille dans un document HTML autonome.
///
/// Le fichier est réécrit à chaque appel à `out`.
///
/// # Example
/// ```no_run
/// use aa_core::frame::CharGrid;
/// use aa_core::traits::AsciiOutput;
/// use aa_render::HtmlOutput;
///
/// let mut sink = HtmlOutput::new("out.html", "Courier New");
/// sink.out(&CharGrid::new(2, 2)).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HtmlOutput {
    path: PathBuf,
    font: String,
}

impl HtmlOutput {
    pub fn new(path: impl AsRef<Path>, font: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            font: font.to_string(),
        }
    }

    /// Build the full document for `art`.
    #[must_use]
    pub fn document(&self, art: &CharGrid) -> String {
        let mut body = String::with_capacity(art.rows() * (art.cols() + 1));
        for row in art.iter_rows() {
            for &ch in row {
                push_escaped(&mut body, ch);
            }
            body.push('\n');
        }

        let mut font = String::with_capacity(self.font.len());
        for ch in self.font.chars() {
            push_escaped(&mut font, ch);
        }

        let mut doc = String::with_capacity(body.len() + 512);
        doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        doc.push_str("<title>ascii-art</title>\n</head>\n");
        doc.push_str("<body style=\"margin:0;background-color:white;\">\n");
        // Écriture dans une String : ne peut pas échouer.
        let _ = write!(
            doc,
            "<pre style=\"font-family:'{font}';font-size:{FONT_SIZE_PX}px;\
             line-height:{LINE_HEIGHT_EM}em;letter-spacing:{LETTER_SPACING_EM}em;\">\n"
        );
        doc.push_str(&body);
        doc.push_str("</pre>\n</body>\n</html>\n");
        doc
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        c => out.push(c),
    }
}

impl AsciiOutput for HtmlOutput {
    fn out(&mut self, art: &CharGrid) -> Result<()> {
        std::fs::write(&self.path, self.document(art))
            .with_context(|| format!("Impossible d'écrire {}", self.path.display()))?;
        log::info!("HTML écrit : {} ({}×{})", self.path.display(), art.rows(), art.cols());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> CharGrid {
        let cols = rows.first().map_or(0, |r| r.chars().count());
        let mut art = CharGrid::new(rows.len(), cols);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                art.set(r, c, ch);
            }
        }
        art
    }

    #[test]
    fn document_wraps_rows_in_pre() {
        let sink = HtmlOutput::new("unused.html", "Courier New");
        let doc = sink.document(&grid(&["ab", "cd"]));
        assert!(doc.contains("font-family:'Courier New'"));
        assert!(doc.contains("\">\nab\ncd\n</pre>"), "{doc}");
    }

    #[test]
    fn special_characters_are_escaped() {
        let sink = HtmlOutput::new("unused.html", "Mono");
        let doc = sink.document(&grid(&["<&>"]));
        assert!(doc.contains("&lt;&amp;&gt;\n</pre>"));
        assert!(!doc.contains("<&>"));
    }

    #[test]
    fn font_name_cannot_break_the_attribute() {
        let sink = HtmlOutput::new("unused.html", "x';color:red");
        let doc = sink.document(&grid(&["a"]));
        assert!(doc.contains("font-family:'x&#39;;color:red'"));
    }

    #[test]
    fn out_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.html");
        let mut sink = HtmlOutput::new(&path, "Courier New");
        sink.out(&grid(&["42"])).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, sink.document(&grid(&["42"])));
        assert!(written.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn unwritable_path_is_reported() {
        let mut sink = HtmlOutput::new("/nonexistent/dir/out.html", "Mono");
        let err = sink.out(&grid(&["a"])).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/dir/out.html"));
    }
}
