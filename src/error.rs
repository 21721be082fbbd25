//! Error types for typecraft

use std::path::PathBuf;
use thiserror::Error;

/// Crate error type
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON data could not be read
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A word list with nothing to sample from
    #[error("Word list is empty: {0}")]
    EmptyWordList(String),

    /// Word count bounds that cannot be sampled from
    #[error("Invalid word range: {min}..={max}")]
    InvalidWordRange { min: usize, max: usize },

    /// Practice countdown that could never run
    #[error("Practice time must be at least one second")]
    ZeroPracticeTime,

    /// Custom prompt with nothing to type
    #[error("Practice prompt is empty")]
    EmptyPrompt,

    /// Embedded data file missing from the binary
    #[error("Missing embedded data file: {0}")]
    MissingData(PathBuf),

    /// Level table that cannot drive a campaign
    #[error("Invalid level table: {0}")]
    InvalidLevel(String),
}

/// Result type for typecraft operations
pub type Result<T> = std::result::Result<T, Error>;
