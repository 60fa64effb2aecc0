/// Interactive front-end for ascii-art: CLI, command parsing and the
/// line-oriented shell.
pub mod cli;
pub mod command;
pub mod error;
pub mod shell;

pub use command::{CharSelection, Command, ResStep};
pub use error::ShellError;
pub use shell::Shell;
