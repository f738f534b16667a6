/*!
 * Error types for the srtshift application.
 *
 * `SubtitleError` is the closed set of domain failures raised by the core
 * (timestamps, SRT structure, offsets, file handling). `AppError` sits on top
 * of it for the binary and carries the process exit code mapping.
 */

use thiserror::Error;

/// Result alias used by the core modules
pub type Result<T> = std::result::Result<T, SubtitleError>;

/// Errors that can occur while reading, shifting or writing subtitles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// Malformed or out-of-range timestamp, or a duration SRT cannot represent
    #[error("Timestamp error: {0}")]
    Timestamp(String),

    /// Structurally invalid subtitle entry or document
    #[error("SRT format error: {0}")]
    Format(String),

    /// Non-numeric offset or one outside the allowed range
    #[error("Offset error: {0}")]
    Offset(String),

    /// Missing/unreadable input, unwritable output, or an I/O failure
    #[error("File error: {0}")]
    File(String),
}

impl SubtitleError {
    pub fn timestamp(message: impl Into<String>) -> Self {
        Self::Timestamp(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn offset(message: impl Into<String>) -> Self {
        Self::Offset(message.into())
    }

    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from subtitle processing
    #[error(transparent)]
    Subtitle(#[from] SubtitleError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Interrupted by the user (Ctrl-C)
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Any other error
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Subtitle(SubtitleError::File(_)) => 1,
            Self::Subtitle(SubtitleError::Format(_)) => 2,
            Self::Subtitle(SubtitleError::Timestamp(_)) => 3,
            Self::Subtitle(SubtitleError::Offset(_)) => 4,
            Self::Config(_) => 5,
            Self::Cancelled => 130,
            Self::Unknown(_) => 99,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Subtitle(SubtitleError::File(error.to_string()))
    }
}
