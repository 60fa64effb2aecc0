use aa_core::error::CoreError;
use thiserror::Error;

/// Why a shell command was not carried out.
///
/// The `Display` text of every user-facing variant is the exact line the
/// shell prints.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Did not execute due to incorrect command.")]
    UnknownCommand,

    #[error("Did not add due to incorrect format.")]
    AddFormat,

    #[error("Did not remove due to incorrect format.")]
    RemoveFormat,

    #[error("Did not change resolution due to incorrect format.")]
    ResolutionFormat,

    #[error("Did not change resolution due to exceeding boundaries.")]
    ResolutionBounds,

    #[error("Did not execute due to problem with image file.")]
    ImageFile,

    #[error("Did not change output method due to incorrect format.")]
    OutputFormat,

    #[error("Did not execute. Charset is empty.")]
    EmptyCharset,

    /// Échec interne du pipeline (tuiles, correspondance).
    #[error("{0}")]
    Core(#[from] CoreError),

    /// La destination de sortie a refusé l'écriture.
    #[error("Did not execute due to output failure: {0:#}")]
    Output(anyhow::Error),

    /// Le terminal du shell lui-même n'est plus inscriptible.
    #[error("E/S shell : {0}")]
    Io(#[from] std::io::Error),
}
