//! # Validation Module
//!
//! Quality checks on scored reviews: sentiment/rating correlation over a
//! reproducible sample, sentiment distribution, and rating/polarity
//! disagreement anomalies.

use crate::data::{Dataset, ReviewRow};
use crate::defaults;
use crate::error::{Error, Result};
use crate::sentiment::SentimentCategory;
use crate::stats::{correlation, DescriptiveStats};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum number of rows examined
    pub sample_size: usize,
    /// Seed for drawing the sample
    pub seed: u64,
    /// Anomaly rate above which a warning is logged
    pub anomaly_warn_rate: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            sample_size: defaults::SAMPLE_SIZE,
            seed: defaults::SAMPLE_SEED,
            anomaly_warn_rate: defaults::ANOMALY_WARN_RATE,
        }
    }
}

/// Result of one validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Pearson correlation of sampled sentiment against rating
    pub correlation: f64,
    /// Distribution of sampled sentiment
    pub sentiment_stats: DescriptiveStats,
    /// Share of sampled rows flagged as anomalies
    pub anomaly_rate: f64,
    /// Rows actually examined
    pub sample_size: usize,
    /// Rating >= 4 with negative sentiment
    pub high_rating_negative: usize,
    /// Rating <= 2 with positive sentiment
    pub low_rating_positive: usize,
}

impl ValidationReport {
    /// Total flagged rows
    pub fn anomaly_count(&self) -> usize {
        self.high_rating_negative + self.low_rating_positive
    }
}

/// Sampled rating/sentiment agreement checks
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Create an engine with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Set sample size
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.config.sample_size = sample_size;
        self
    }

    /// Set sampling seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a scored dataset
    ///
    /// Datasets larger than the sample size are sampled uniformly without
    /// replacement using the configured seed, so repeated runs over the
    /// same dataset give the same report. Smaller datasets are used whole.
    pub fn validate(&self, dataset: &Dataset) -> Result<ValidationReport> {
        let sample_size = self.config.sample_size;
        if sample_size == 0 {
            return Err(Error::InvalidSampleSize(sample_size));
        }
        if dataset.is_empty() {
            return Err(Error::EmptyDataset("validation needs at least one row"));
        }

        let sample = self.draw_sample(dataset);
        debug!(
            sample = sample.len(),
            total = dataset.len(),
            seed = self.config.seed,
            "Drew validation sample"
        );

        let mut sentiments = Vec::with_capacity(sample.len());
        let mut ratings = Vec::with_capacity(sample.len());
        let mut high_rating_negative = 0;
        let mut low_rating_positive = 0;

        for &(row, review) in &sample {
            let sentiment = review.sentiment().ok_or(Error::MissingSentiment { row })?;
            let category = SentimentCategory::from_score(sentiment);

            if review.rating >= defaults::HIGH_RATING && category == SentimentCategory::Negative {
                high_rating_negative += 1;
            }
            if review.rating <= defaults::LOW_RATING && category == SentimentCategory::Positive {
                low_rating_positive += 1;
            }

            sentiments.push(sentiment);
            ratings.push(review.rating as f64);
        }

        let sentiment_stats = DescriptiveStats::compute(&sentiments)
            .ok_or(Error::EmptyDataset("validation sample is empty"))?;
        let anomaly_rate =
            (high_rating_negative + low_rating_positive) as f64 / sample.len() as f64;

        if anomaly_rate > self.config.anomaly_warn_rate {
            warn!(
                "Anomaly rate {:.1}% exceeds {:.1}%",
                anomaly_rate * 100.0,
                self.config.anomaly_warn_rate * 100.0
            );
        }

        Ok(ValidationReport {
            correlation: correlation(&sentiments, &ratings),
            sentiment_stats,
            anomaly_rate,
            sample_size: sample.len(),
            high_rating_negative,
            low_rating_positive,
        })
    }

    /// Rows to examine, paired with their dataset index, in dataset order
    fn draw_sample<'a>(&self, dataset: &'a Dataset) -> Vec<(usize, &'a ReviewRow)> {
        let rows = dataset.rows();
        if rows.len() <= self.config.sample_size {
            return rows.iter().enumerate().collect();
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut indices =
            rand::seq::index::sample(&mut rng, rows.len(), self.config.sample_size).into_vec();
        indices.sort_unstable();

        indices.into_iter().map(|i| (i, &rows[i])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between a test and its subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn validate_logged(engine: &ValidationEngine, dataset: &Dataset) -> (ValidationReport, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let report =
            tracing::subscriber::with_default(subscriber, || engine.validate(dataset)).unwrap();
        (report, logs.contents())
    }

    fn scored(ratings: &[u8], sentiments: &[f64]) -> Dataset {
        let rows = ratings
            .iter()
            .enumerate()
            .map(|(i, &r)| ReviewRow::new(format!("review {i}"), r))
            .collect::<Vec<_>>();
        Dataset::new(rows).with_scores(sentiments.to_vec()).unwrap()
    }

    #[test]
    fn test_small_dataset_uses_all_rows() {
        let dataset = scored(&[5, 1, 3, 5, 1], &[0.9, -0.8, 0.0, 0.95, -0.85]);

        let report = ValidationEngine::default().with_sample_size(1000).validate(&dataset).unwrap();

        assert_eq!(report.sample_size, 5);
        assert_eq!(report.anomaly_rate, 0.0);
        assert_eq!(report.anomaly_count(), 0);
        assert!(report.correlation > 0.9);
        assert_abs_diff_eq!(report.sentiment_stats.mean, 0.04, epsilon = 1e-12);
        assert_eq!(report.sentiment_stats.min, -0.85);
        assert_eq!(report.sentiment_stats.max, 0.95);
    }

    #[test]
    fn test_anomalies_counted() {
        let dataset = scored(
            &[5, 4, 2, 1, 3, 4],
            &[-0.5, -0.1, 0.6, 0.1, -0.9, 0.8],
        );

        let report = ValidationEngine::default().validate(&dataset).unwrap();

        // -0.1 and 0.1 are neutral and not flagged
        assert_eq!(report.high_rating_negative, 1);
        assert_eq!(report.low_rating_positive, 1);
        assert_abs_diff_eq!(report.anomaly_rate, 2.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_high_anomaly_rate_warns() {
        let dataset = scored(
            &[5, 4, 2, 1, 3, 4],
            &[-0.5, -0.1, 0.6, 0.1, -0.9, 0.8],
        );

        let (report, logs) = validate_logged(&ValidationEngine::default(), &dataset);

        assert!(report.anomaly_rate > ValidationConfig::default().anomaly_warn_rate);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Anomaly rate 33.3% exceeds 20.0%"));
    }

    #[test]
    fn test_anomaly_rate_below_threshold_is_quiet() {
        let dataset = scored(&[5, 1, 3, 5, 1], &[0.9, -0.8, 0.0, 0.95, -0.85]);
        let lenient = ValidationEngine::new(ValidationConfig {
            anomaly_warn_rate: 0.5,
            ..ValidationConfig::default()
        });

        let (_, quiet) = validate_logged(&ValidationEngine::default(), &dataset);
        let one_in_three = scored(&[5, 4, 3], &[-0.5, 0.2, 0.0]);
        let (_, lenient_logs) = validate_logged(&lenient, &one_in_three);

        assert!(!quiet.contains("Anomaly rate"));
        assert!(!lenient_logs.contains("Anomaly rate"));
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let dataset = scored(&[5], &[0.5]);
        let err = ValidationEngine::default()
            .with_sample_size(0)
            .validate(&dataset)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSampleSize(0)));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = ValidationEngine::default().validate(&Dataset::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset(_)));
    }

    #[test]
    fn test_unscored_rejected() {
        let dataset = Dataset::new(vec![ReviewRow::new("x", 3)]);
        let err = ValidationEngine::default().validate(&dataset).unwrap_err();
        assert!(matches!(err, Error::MissingSentiment { row: 0 }));
    }

    #[test]
    fn test_sampling_is_reproducible() {
        let n = 5000;
        let ratings: Vec<u8> = (0..n).map(|i| (i % 5 + 1) as u8).collect();
        let sentiments: Vec<f64> = (0..n)
            .map(|i| ((i * 7919) % 2001) as f64 / 1000.0 - 1.0)
            .collect();
        let dataset = scored(&ratings, &sentiments);
        let engine = ValidationEngine::default();

        let first = engine.validate(&dataset).unwrap();
        let second = engine.validate(&dataset).unwrap();
        let other_seed = engine.clone().with_seed(7).validate(&dataset).unwrap();

        assert_eq!(first.sample_size, 1000);
        assert_eq!(first, second);
        assert_eq!(other_seed.sample_size, 1000);
        assert_ne!(first.sentiment_stats, other_seed.sentiment_stats);
    }
}
