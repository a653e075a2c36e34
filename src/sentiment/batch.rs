//! # Batch Sentiment Engine
//!
//! Drives a [`PolarityScorer`] over large text collections in fixed-size
//! batches. Each batch's scores are produced into a buffer owned by the loop
//! body and dropped before the next batch starts, so the working set beyond
//! the output itself stays proportional to the batch size.

use super::scorer::PolarityScorer;
use crate::data::Dataset;
use crate::defaults;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Batch scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Texts per batch
    pub batch_size: usize,
    /// Progress notification cadence, in batches
    pub progress_every: usize,
    /// Memory checkpoint cadence, in batches
    pub reclaim_every: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::BATCH_SIZE,
            progress_every: defaults::PROGRESS_EVERY,
            reclaim_every: defaults::RECLAIM_EVERY,
        }
    }
}

impl BatchConfig {
    /// Check that all sizes and cadences are positive
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".to_string()));
        }
        if self.progress_every == 0 {
            return Err(Error::Config("progress_every must be at least 1".to_string()));
        }
        if self.reclaim_every == 0 {
            return Err(Error::Config("reclaim_every must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Progress notification emitted at batch boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Zero-based index of the batch just completed
    pub batch_index: usize,
    /// Texts scored so far
    pub processed: usize,
    /// Total texts in the call
    pub total: usize,
}

impl BatchProgress {
    /// Completed fraction in [0, 1]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Batch driver around an injected polarity scorer
#[derive(Debug, Clone)]
pub struct BatchSentimentEngine<S> {
    scorer: S,
    config: BatchConfig,
}

impl<S: PolarityScorer> BatchSentimentEngine<S> {
    /// Create an engine with the default batch configuration
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            config: BatchConfig::default(),
        }
    }

    /// Replace the batch configuration
    pub fn with_config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Set batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Score texts, reporting progress through the log only
    pub fn score<T: AsRef<str>>(&self, texts: &[T]) -> Result<Vec<f64>> {
        self.score_with_progress(texts, |_| {})
    }

    /// Score texts, calling `on_progress` at every progress cadence
    ///
    /// Output has the same length and order as `texts`. A scorer failure
    /// aborts the call and no scores are returned.
    pub fn score_with_progress<T, F>(&self, texts: &[T], mut on_progress: F) -> Result<Vec<f64>>
    where
        T: AsRef<str>,
        F: FnMut(BatchProgress),
    {
        self.config.validate()?;

        let total = texts.len();
        let batch_size = self.config.batch_size;
        let mut scores = Vec::with_capacity(total);

        debug!(
            scorer = self.scorer.name(),
            total,
            batch_size,
            "Starting batch scoring"
        );

        for (batch_index, batch) in texts.chunks(batch_size).enumerate() {
            let offset = batch_index * batch_size;

            let batch_scores = batch
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    self.scorer
                        .score(text.as_ref())
                        .map_err(|source| Error::ScoringFailure {
                            index: offset + i,
                            source,
                        })
                })
                .collect::<Result<Vec<f64>>>()?;
            scores.extend(batch_scores);

            if batch_index % self.config.progress_every == 0 {
                let progress = BatchProgress {
                    batch_index,
                    processed: (offset + batch_size).min(total),
                    total,
                };
                info!("Processed {}/{} reviews", progress.processed, progress.total);
                on_progress(progress);
            }

            if batch_index % self.config.reclaim_every == 0 {
                debug!(batch_index, "Memory checkpoint: batch buffers released");
            }
        }

        Ok(scores)
    }

    /// Score every row's text and attach scores and categories
    pub fn analyze_dataset(&self, dataset: Dataset) -> Result<Dataset> {
        info!("Analyzing sentiment for {} reviews...", dataset.len());
        dataset.ensure_unscored()?;

        let scores = {
            let texts = dataset.texts();
            self.score(&texts)?
        };
        let scored = dataset.with_scores(scores)?;

        info!("Sentiment analysis completed!");
        Ok(scored)
    }
}
