//! # Sentiment Module
//!
//! Polarity scoring, batch scoring over large collections, and categorization.

mod analyzer;
mod batch;
mod category;
mod lexicon;
mod scorer;
#[cfg(feature = "vader")]
mod vader;

pub use analyzer::LexiconScorer;
pub use batch::{BatchConfig, BatchProgress, BatchSentimentEngine};
pub use category::{categorize, SentimentCategory};
pub use lexicon::ReviewLexicon;
pub use scorer::{PolarityScorer, ScorerError};
#[cfg(feature = "vader")]
pub use vader::VaderScorer;
