//! # Polarity Scorer
//!
//! Seam between the pipeline and the lexical model that turns a text into a
//! compound polarity score.

use thiserror::Error;

/// Failure reported by a polarity scorer for a single text
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ScorerError {
    message: String,
}

impl ScorerError {
    /// Create a scorer error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Maps a text to a compound polarity score in [-1, 1]
///
/// Implementations are synchronous and side-effect free. They are passed to
/// [`BatchSentimentEngine`](super::BatchSentimentEngine) explicitly, so tests
/// can inject stub scorers.
pub trait PolarityScorer {
    /// Compound score of `text`
    fn score(&self, text: &str) -> Result<f64, ScorerError>;

    /// Scorer name for logs
    fn name(&self) -> &str {
        "polarity-scorer"
    }
}

impl<S: PolarityScorer + ?Sized> PolarityScorer for &S {
    fn score(&self, text: &str) -> Result<f64, ScorerError> {
        (**self).score(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: PolarityScorer + ?Sized> PolarityScorer for Box<S> {
    fn score(&self, text: &str) -> Result<f64, ScorerError> {
        (**self).score(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
