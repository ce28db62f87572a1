use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON render error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown option: {option}")]
    UnknownOption { option: String },

    #[error("Unsupported format or invalid file: {path}. reason={reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("Unrecognized file type: {path}")]
    UnrecognizedMimeType { path: PathBuf },
}

/// Why GPS coordinates could not be derived for a report section.
///
/// These are recoverable: they end up as data inside the report rather
/// than aborting it. The `Display` strings are what the text renderer
/// prints after the `Location:` label.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GpsError {
    #[error("not available")]
    Unavailable,

    #[error("incomplete data")]
    Incomplete,
}
