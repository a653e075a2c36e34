//! # Sentiment Summary
//!
//! Full-dataset statistics and category distribution.

use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::sentiment::{categorize, SentimentCategory};
use crate::stats::DescriptiveStats;
use serde::{Deserialize, Serialize};

/// Statistics over the whole sentiment column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_reviews: usize,
    pub mean_sentiment: f64,
    pub std_sentiment: f64,
    pub min_sentiment: f64,
    pub max_sentiment: f64,
}

/// Row count per category; every category is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
}

impl CategoryCounts {
    /// Count for one category
    pub fn get(&self, category: SentimentCategory) -> usize {
        match category {
            SentimentCategory::Negative => self.negative,
            SentimentCategory::Neutral => self.neutral,
            SentimentCategory::Positive => self.positive,
        }
    }

    fn increment(&mut self, category: SentimentCategory) {
        match category {
            SentimentCategory::Negative => self.negative += 1,
            SentimentCategory::Neutral => self.neutral += 1,
            SentimentCategory::Positive => self.positive += 1,
        }
    }

    /// Sum over all categories
    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive
    }
}

/// Percentage of rows per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPercentages {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl CategoryPercentages {
    fn from_counts(counts: &CategoryCounts, total: usize) -> Self {
        let pct = |count: usize| count as f64 / total as f64 * 100.0;
        Self {
            negative: pct(counts.negative),
            neutral: pct(counts.neutral),
            positive: pct(counts.positive),
        }
    }

    /// Percentage for one category
    pub fn get(&self, category: SentimentCategory) -> f64 {
        match category {
            SentimentCategory::Negative => self.negative,
            SentimentCategory::Neutral => self.neutral,
            SentimentCategory::Positive => self.positive,
        }
    }

    /// Sum over all categories (100 up to rounding)
    pub fn sum(&self) -> f64 {
        self.negative + self.neutral + self.positive
    }
}

/// Summary of a fully scored dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub basic_stats: BasicStats,
    pub distribution: CategoryCounts,
    pub percentages: CategoryPercentages,
}

/// Builds [`SummaryReport`]s
#[derive(Debug, Clone, Default)]
pub struct SummaryReporter;

impl SummaryReporter {
    pub fn new() -> Self {
        Self
    }

    /// Summarize a dataset in which every row carries a score
    pub fn summarize(&self, dataset: &Dataset) -> Result<SummaryReport> {
        let sentiments = dataset.sentiments()?;
        let stats = DescriptiveStats::compute(&sentiments)
            .ok_or(Error::EmptyDataset("summary needs at least one row"))?;

        let mut distribution = CategoryCounts::default();
        for &score in &sentiments {
            distribution.increment(categorize(score));
        }

        Ok(SummaryReport {
            basic_stats: BasicStats {
                total_reviews: stats.count,
                mean_sentiment: stats.mean,
                std_sentiment: stats.std,
                min_sentiment: stats.min,
                max_sentiment: stats.max,
            },
            percentages: CategoryPercentages::from_counts(&distribution, stats.count),
            distribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReviewRow;
    use approx::assert_abs_diff_eq;

    fn scored(sentiments: &[f64]) -> Dataset {
        let rows = sentiments.iter().map(|_| ReviewRow::new("text", 3)).collect();
        Dataset::new(rows).with_scores(sentiments.to_vec()).unwrap()
    }

    #[test]
    fn test_summary_counts_and_percentages() {
        let dataset = scored(&[0.9, -0.8, 0.0, 0.95, -0.85, 0.1, 0.3]);

        let summary = SummaryReporter::new().summarize(&dataset).unwrap();

        assert_eq!(summary.basic_stats.total_reviews, 7);
        assert_eq!(summary.distribution.negative, 2);
        assert_eq!(summary.distribution.neutral, 2);
        assert_eq!(summary.distribution.positive, 3);
        assert_eq!(summary.distribution.total(), 7);
        assert_abs_diff_eq!(summary.percentages.sum(), 100.0, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.percentages.positive, 300.0 / 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_categories_are_zero() {
        let summary = SummaryReporter::new().summarize(&scored(&[0.5, 0.7])).unwrap();

        assert_eq!(summary.distribution.get(SentimentCategory::Negative), 0);
        assert_eq!(summary.distribution.get(SentimentCategory::Neutral), 0);
        assert_eq!(summary.percentages.get(SentimentCategory::Positive), 100.0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["distribution"]["negative"], 0);
        assert_eq!(json["percentages"]["neutral"], 0.0);
    }

    #[test]
    fn test_missing_sentiment() {
        let dataset = Dataset::new(vec![ReviewRow::new("x", 4)]);
        let err = SummaryReporter::new().summarize(&dataset).unwrap_err();
        assert!(matches!(err, Error::MissingSentiment { row: 0 }));
    }

    #[test]
    fn test_empty_dataset() {
        let err = SummaryReporter::new().summarize(&Dataset::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset(_)));
    }

    #[test]
    fn test_percentages_sum_for_many_partitions() {
        for n in 1..60 {
            let sentiments: Vec<f64> = (0..n).map(|i| ((i * 13) % 21) as f64 / 10.0 - 1.0).collect();
            let summary = SummaryReporter::new().summarize(&scored(&sentiments)).unwrap();
            assert_eq!(summary.distribution.total(), n);
            assert_abs_diff_eq!(summary.percentages.sum(), 100.0, epsilon = 1e-6);
        }
    }
}
