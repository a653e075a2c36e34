//! VADER polarity scorer backed by the `vader_sentiment` crate

use super::scorer::{PolarityScorer, ScorerError};

/// Compound score from the VADER lexicon and rules
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderScorer;

impl VaderScorer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for VaderScorer {
    fn score(&self, text: &str) -> Result<f64, ScorerError> {
        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .ok_or_else(|| ScorerError::new("VADER returned no compound score"))
    }

    fn name(&self) -> &str {
        "vader"
    }
}
