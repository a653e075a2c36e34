//! # Sentiment Categories
//!
//! Three-way classification of compound scores.

use crate::defaults::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete sentiment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    /// score < -0.1
    Negative,
    /// -0.1 <= score <= 0.1
    Neutral,
    /// score > 0.1
    Positive,
}

impl SentimentCategory {
    /// All categories in report order
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Negative,
        SentimentCategory::Neutral,
        SentimentCategory::Positive,
    ];

    /// Convert numeric score to category
    pub fn from_score(score: f64) -> Self {
        if score < NEGATIVE_THRESHOLD {
            SentimentCategory::Negative
        } else if score > POSITIVE_THRESHOLD {
            SentimentCategory::Positive
        } else {
            SentimentCategory::Neutral
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Negative => "negative",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Positive => "positive",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorize a compound score
///
/// Both boundary values are neutral. NaN compares false on both sides and
/// also lands in neutral.
pub fn categorize(score: f64) -> SentimentCategory {
    SentimentCategory::from_score(score)
}
