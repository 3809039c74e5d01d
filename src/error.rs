use std::path::PathBuf;
use thiserror::Error;

pub type MosaicResult<T> = Result<T, MosaicError>;

#[derive(Error, Debug)]
pub enum MosaicError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to start export session: {0}")]
    SessionStart(String),

    #[error("Failed to write worksheet: {0}")]
    Export(String),

    #[error(
        "Image is {width}x{height} pixels but a worksheet holds at most {max_columns}x{max_rows} cells"
    )]
    TooLarge {
        width: u32,
        height: u32,
        max_columns: u32,
        max_rows: u32,
    },

    #[error("Failed to save workbook {}: {reason}", path.display())]
    Save { path: PathBuf, reason: String },

    #[error("Failed to close export session: {0}")]
    Termination(String),

    #[error("Conversion cancelled")]
    Cancelled,

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl MosaicError {
    /// Short message shown to the user; the full error only goes to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            MosaicError::Io(_) | MosaicError::Decode { .. } => "Could not read the image",
            MosaicError::SessionStart(_) => "Could not start the workbook",
            MosaicError::Export(_) => "Could not write the worksheet",
            MosaicError::TooLarge { .. } => "Image is too large for a worksheet",
            MosaicError::Save { .. } => "Could not save the workbook",
            MosaicError::Termination(_) => "Could not close the workbook",
            MosaicError::Cancelled => "Conversion cancelled",
            MosaicError::InvalidOption(_) => "Invalid conversion options",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, MosaicError::Cancelled)
    }
}
