use std::path::PathBuf;

use aa_core::charset::{char_range, printable_ascii};
use aa_core::config::OutputKind;

use crate::error::ShellError;

/// Characters named by an `add`/`remove` argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharSelection {
    /// One literal character.
    Single(char),
    /// Printable ASCII, `[32, 127)`.
    All,
    /// The space character.
    Space,
    /// Inclusive code range, either direction.
    Range(char, char),
}

impl CharSelection {
    /// Parse the argument of `add`/`remove`. `None` if malformed.
    ///
    /// # Example
    /// ```
    /// use aa_app::CharSelection;
    /// assert_eq!(CharSelection::parse("d-a"), Some(CharSelection::Range('d', 'a')));
    /// assert_eq!(CharSelection::parse("-"), Some(CharSelection::Single('-')));
    /// assert_eq!(CharSelection::parse("ab"), None);
    /// ```
    #[must_use]
    pub fn parse(arg: &str) -> Option<Self> {
        match arg {
            "all" => return Some(Self::All),
            "space" => return Some(Self::Space),
            _ => {}
        }
        let mut chars = arg.chars();
        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(c), None, _, _) => Some(Self::Single(c)),
            (Some(from), Some('-'), Some(to), None) => Some(Self::Range(from, to)),
            _ => None,
        }
    }

    /// Every character of the selection, ascending.
    #[must_use]
    pub fn chars(self) -> Vec<char> {
        match self {
            Self::Single(c) => vec![c],
            Self::All => printable_ascii().collect(),
            Self::Space => vec![' '],
            Self::Range(a, b) => char_range(a, b).collect(),
        }
    }
}

/// Direction of a `res` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResStep {
    Up,
    Down,
}

/// One parsed shell line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    Chars,
    Add(CharSelection),
    Remove(CharSelection),
    Res(ResStep),
    Image(PathBuf),
    Output(OutputKind),
    AsciiArt,
}

/// Parse une ligne saisie (sans le saut de ligne final).
///
/// Les mots sont séparés par une espace simple ; les séparateurs en fin
/// de ligne sont ignorés. `exit` doit être seul sur la ligne.
///
/// # Errors
/// Returns the [`ShellError`] whose message the shell prints for a
/// malformed line.
///
/// # Example
/// ```
/// use aa_app::command::{Command, parse};
/// use aa_app::{CharSelection, ResStep};
/// assert_eq!(parse("add a-z").unwrap(), Command::Add(CharSelection::Range('a', 'z')));
/// assert_eq!(parse("res up").unwrap(), Command::Res(ResStep::Up));
/// assert!(parse("paint").is_err());
/// ```
pub fn parse(line: &str) -> Result<Command, ShellError> {
    if line == "exit" {
        return Ok(Command::Exit);
    }

    let mut words: Vec<&str> = line.split(' ').collect();
    while words.len() > 1 && words.last() == Some(&"") {
        words.pop();
    }

    match words.as_slice() {
        ["chars", ..] => Ok(Command::Chars),
        ["asciiArt", ..] => Ok(Command::AsciiArt),
        ["add", rest @ ..] => selection(rest)
            .map(Command::Add)
            .ok_or(ShellError::AddFormat),
        ["remove", rest @ ..] => selection(rest)
            .map(Command::Remove)
            .ok_or(ShellError::RemoveFormat),
        ["res", rest @ ..] => match rest {
            ["up"] => Ok(Command::Res(ResStep::Up)),
            ["down"] => Ok(Command::Res(ResStep::Down)),
            _ => Err(ShellError::ResolutionFormat),
        },
        ["image", rest @ ..] => match rest {
            [path] if !path.is_empty() => Ok(Command::Image(PathBuf::from(path))),
            _ => Err(ShellError::ImageFile),
        },
        ["output", rest @ ..] => match rest {
            ["console"] => Ok(Command::Output(OutputKind::Console)),
            ["html"] => Ok(Command::Output(OutputKind::Html)),
            _ => Err(ShellError::OutputFormat),
        },
        _ => Err(ShellError::UnknownCommand),
    }
}

fn selection(rest: &[&str]) -> Option<CharSelection> {
    match rest {
        [arg] => CharSelection::parse(arg),
        _ => None,
    }
}
