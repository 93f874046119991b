//! Error types for the data-loader crate.
//!
//! Every way a similarity bundle can be rejected at startup has its own
//! variant, so the CLI can report exactly what is wrong with the artifact.

use thiserror::Error;

/// Errors that can occur while loading and validating a catalog bundle
///
/// The `#[derive(Error)]` macro from thiserror implements `std::error::Error`
/// and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Bundle file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the bundle
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Bundle contents were not valid JSON or did not match the expected shape
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// Matrix row count does not match the number of movies
    #[error("Similarity matrix has {rows} rows but catalog has {expected} movies")]
    DimensionMismatch { rows: usize, expected: usize },

    /// A matrix row has the wrong number of columns
    #[error("Similarity row {row} has {found} columns, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A score is NaN or infinite
    #[error("Non-finite similarity score at ({row}, {col})")]
    NonFiniteScore { row: usize, col: usize },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
