//! # Review Sentiment
//!
//! Sentiment scoring and rating/sentiment validation for product reviews.
//!
//! ## Modules
//!
//! - `data` - Review rows, datasets, loading and text cleanup
//! - `sentiment` - Polarity scoring, batch engine and categorization
//! - `stats` - Pearson correlation, descriptive statistics, linear fits
//! - `validation` - Sampled rating/sentiment agreement checks
//! - `report` - Dataset summary and printable findings
//!
//! ## Example Usage
//!
//! ```no_run
//! use review_sentiment::{
//!     BatchSentimentEngine, Dataset, LexiconScorer, ReviewRow, SummaryReporter, ValidationEngine,
//! };
//!
//! fn main() -> review_sentiment::Result<()> {
//!     let rows = vec![
//!         ReviewRow::new("I love this product! It's amazing.", 5),
//!         ReviewRow::new("Terrible quality, would not recommend.", 1),
//!     ];
//!
//!     let engine = BatchSentimentEngine::new(LexiconScorer::new());
//!     let scored = engine.analyze_dataset(Dataset::new(rows))?;
//!
//!     let validation = ValidationEngine::default().validate(&scored)?;
//!     let summary = SummaryReporter::new().summarize(&scored)?;
//!
//!     println!("Correlation: {:.3}", validation.correlation);
//!     println!("Mean sentiment: {:.3}", summary.basic_stats.mean_sentiment);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod report;
pub mod sentiment;
pub mod stats;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use data::{Dataset, ReviewRow, TextPreprocessor, UserSummary, UserType};
pub use error::{Error, Result};
pub use report::{FindingsReport, SummaryReport, SummaryReporter};
pub use sentiment::{
    categorize, BatchConfig, BatchProgress, BatchSentimentEngine, LexiconScorer, PolarityScorer,
    ReviewLexicon, ScorerError, SentimentCategory,
};
#[cfg(feature = "vader")]
pub use sentiment::VaderScorer;
pub use stats::{correlation, DescriptiveStats, LinearFit};
pub use validation::{ValidationConfig, ValidationEngine, ValidationReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Number of texts scored per batch
    pub const BATCH_SIZE: usize = 10_000;

    /// Emit a progress notification every this many batches
    pub const PROGRESS_EVERY: usize = 10;

    /// Emit a memory checkpoint every this many batches
    pub const RECLAIM_EVERY: usize = 50;

    /// Scores below this are negative
    pub const NEGATIVE_THRESHOLD: f64 = -0.1;

    /// Scores above this are positive
    pub const POSITIVE_THRESHOLD: f64 = 0.1;

    /// Rows drawn for validation
    pub const SAMPLE_SIZE: usize = 1000;

    /// Seed for the validation sample
    pub const SAMPLE_SEED: u64 = 42;

    /// Ratings at or above this are "high"
    pub const HIGH_RATING: u8 = 4;

    /// Ratings at or below this are "low"
    pub const LOW_RATING: u8 = 2;

    /// Anomaly rate above which validation logs a warning
    pub const ANOMALY_WARN_RATE: f64 = 0.2;
}
