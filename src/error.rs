//! Error types for the review sentiment pipeline

use crate::sentiment::ScorerError;
use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// The polarity scorer failed on one item; the whole batch call is aborted
    #[error("Scoring failed for item {index}: {source}")]
    ScoringFailure {
        index: usize,
        #[source]
        source: ScorerError,
    },

    /// Validation sample size must be positive
    #[error("Invalid sample size: {0} (must be at least 1)")]
    InvalidSampleSize(usize),

    /// A row has no sentiment score attached
    #[error("Row {row} has no sentiment score")]
    MissingSentiment { row: usize },

    /// A row already carries a sentiment score
    #[error("Row {row} already has a sentiment score")]
    AlreadyScored { row: usize },

    /// Score vector length differs from the dataset
    #[error("Length mismatch: expected {expected} scores, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Operation needs at least one row
    #[error("Empty dataset: {0}")]
    EmptyDataset(&'static str),

    /// Rating outside the 1-5 star range
    #[error("Invalid rating {rating} in row {row} (expected 1-5)")]
    InvalidRating { row: usize, rating: i64 },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Unsupported input file
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Check if the error comes from bad caller input rather than I/O
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSampleSize(_)
                | Error::MissingSentiment { .. }
                | Error::AlreadyScored { .. }
                | Error::LengthMismatch { .. }
                | Error::EmptyDataset(_)
                | Error::InvalidRating { .. }
                | Error::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidSampleSize(0);
        assert_eq!(err.to_string(), "Invalid sample size: 0 (must be at least 1)");

        let err = Error::MissingSentiment { row: 3 };
        assert_eq!(err.to_string(), "Row 3 has no sentiment score");
    }

    #[test]
    fn test_scoring_failure_source() {
        use std::error::Error as _;

        let err = Error::ScoringFailure {
            index: 7,
            source: ScorerError::new("lexicon unavailable"),
        };
        assert!(err.to_string().contains("item 7"));
        assert!(err.source().is_some());
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_input_errors() {
        assert!(Error::EmptyDataset("summary").is_input_error());
        assert!(Error::LengthMismatch { expected: 2, actual: 1 }.is_input_error());
    }
}
