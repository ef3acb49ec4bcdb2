use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while packing or unpacking a container.
#[derive(Debug, thiserror::Error)]
pub enum HuffError {
    /// The input path does not exist.
    #[error("input not found: {}", .0.display())]
    NotFound(PathBuf),

    /// There were no symbols to encode.
    #[error("input is empty")]
    EmptyInput,

    /// The table size is a single byte, so at most 255 distinct symbols fit.
    #[error("too many distinct symbols: {0} exceeds the 255-entry table limit")]
    TooManySymbols(usize),

    /// A symbol of the input has no entry in the code table.
    #[error("symbol {0:#04x} has no code")]
    MissingCode(u8),

    /// Header fields disagree with the declared sizes or the available bytes.
    #[error("corrupted header: {0}")]
    CorruptedHeader(String),

    /// The bit stream cannot be resolved against the code table.
    #[error("corrupted payload: {0}")]
    CorruptedPayload(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl HuffError {
    pub(crate) fn header(reason: impl Into<String>) -> Self {
        HuffError::CorruptedHeader(reason.into())
    }

    pub(crate) fn payload(reason: impl Into<String>) -> Self {
        HuffError::CorruptedPayload(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, HuffError>;
