//! # Review Data
//!
//! Review rows and the tabular dataset the pipeline reads and augments.

use crate::error::{Error, Result};
use crate::sentiment::{categorize, SentimentCategory};
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reviewer segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// User with exactly one review
    Single,
    /// User with more than one review
    Multi,
}

impl UserType {
    /// All user types in report order
    pub const ALL: [UserType; 2] = [UserType::Single, UserType::Multi];

    /// Segment for a user with `review_count` reviews
    pub fn from_review_count(review_count: usize) -> Self {
        if review_count > 1 {
            UserType::Multi
        } else {
            UserType::Single
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Single => "single",
            UserType::Multi => "multi",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product review
///
/// `sentiment` and `sentiment_category` are attached once by
/// [`Dataset::with_scores`] and are read-only afterwards. Rows read from a
/// file get their category re-derived from the stored score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    /// Review text
    pub text: String,
    /// Star rating (1-5)
    pub rating: u8,
    /// Reviewer segment, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    /// Review time, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Reviewer identifier, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment_category: Option<SentimentCategory>,
}

/// A row as it appears in a dataset file
///
/// Any `sentiment_category` column is ignored and re-derived from
/// `sentiment`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReviewRecord {
    text: String,
    rating: i64,
    #[serde(default)]
    user_type: Option<UserType>,
    #[serde(default, deserialize_with = "timestamp_format::deserialize")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    sentiment: Option<f64>,
}

impl ReviewRecord {
    /// Check the rating and build the row found at position `row`
    pub(crate) fn into_row(self, row: usize) -> Result<ReviewRow> {
        let rating = u8::try_from(self.rating)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or(Error::InvalidRating {
                row,
                rating: self.rating,
            })?;

        Ok(ReviewRow {
            text: self.text,
            rating,
            user_type: self.user_type,
            timestamp: self.timestamp,
            user_id: self.user_id,
            sentiment: self.sentiment,
            sentiment_category: self.sentiment.map(categorize),
        })
    }
}

impl ReviewRow {
    /// Create an unscored review
    pub fn new(text: impl Into<String>, rating: u8) -> Self {
        Self {
            text: text.into(),
            rating,
            user_type: None,
            timestamp: None,
            user_id: None,
            sentiment: None,
            sentiment_category: None,
        }
    }

    /// Set reviewer segment
    pub fn with_user_type(mut self, user_type: UserType) -> Self {
        self.user_type = Some(user_type);
        self
    }

    /// Set review time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set reviewer identifier
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Compound sentiment score, once attached
    pub fn sentiment(&self) -> Option<f64> {
        self.sentiment
    }

    /// Sentiment category, once attached
    pub fn sentiment_category(&self) -> Option<SentimentCategory> {
        self.sentiment_category
    }

    /// Whether a score is attached
    pub fn is_scored(&self) -> bool {
        self.sentiment.is_some()
    }

    fn attach_score(&mut self, row: usize, score: f64) -> Result<()> {
        if self.sentiment.is_some() {
            return Err(Error::AlreadyScored { row });
        }
        self.sentiment = Some(score);
        self.sentiment_category = Some(categorize(score));
        Ok(())
    }
}

/// Per-user aggregate (one row per reviewer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Reviewer identifier
    pub user_id: String,
    /// Number of reviews by this user
    pub review_count: usize,
    /// Segment derived from the review count
    pub user_type: UserType,
    /// Mean sentiment over the user's reviews
    pub mean_sentiment: f64,
    /// Mean rating over the user's reviews
    pub mean_rating: f64,
    /// Sentiment of the earliest review
    pub first_sentiment: f64,
    /// Sentiment of the latest review
    pub last_sentiment: f64,
    /// Rating of the earliest review
    pub first_rating: u8,
    /// Rating of the latest review
    pub last_rating: u8,
}

impl UserSummary {
    /// Sentiment change from first to last review
    pub fn sentiment_change(&self) -> f64 {
        self.last_sentiment - self.first_sentiment
    }

    /// Rating change from first to last review
    pub fn rating_change(&self) -> f64 {
        self.last_rating as f64 - self.first_rating as f64
    }
}

/// Ordered collection of review rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<ReviewRow>,
}

impl From<Vec<ReviewRow>> for Dataset {
    fn from(rows: Vec<ReviewRow>) -> Self {
        Self::new(rows)
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records = Vec::<ReviewRecord>::deserialize(deserializer)?;
        Dataset::from_records(records).map_err(D::Error::custom)
    }
}

impl Dataset {
    /// Create a dataset from rows
    pub fn new(rows: Vec<ReviewRow>) -> Self {
        Self { rows }
    }

    /// Validate file records into rows, failing on the first bad rating
    pub(crate) fn from_records(records: Vec<ReviewRecord>) -> Result<Self> {
        records
            .into_iter()
            .enumerate()
            .map(|(row, record)| record.into_row(row))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows
    pub fn rows(&self) -> &[ReviewRow] {
        &self.rows
    }

    /// Iterate over rows
    pub fn iter(&self) -> std::slice::Iter<'_, ReviewRow> {
        self.rows.iter()
    }

    /// Review texts in row order
    pub fn texts(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.text.as_str()).collect()
    }

    /// Ratings in row order
    pub fn ratings(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.rating as f64).collect()
    }

    /// Sentiment scores in row order
    ///
    /// Fails on the first row without a score.
    pub fn sentiments(&self) -> Result<Vec<f64>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, r)| r.sentiment.ok_or(Error::MissingSentiment { row }))
            .collect()
    }

    /// Whether every row carries a score
    pub fn is_scored(&self) -> bool {
        self.rows.iter().all(ReviewRow::is_scored)
    }

    /// Fail if any row already carries a score
    pub fn ensure_unscored(&self) -> Result<()> {
        match self.rows.iter().position(ReviewRow::is_scored) {
            Some(row) => Err(Error::AlreadyScored { row }),
            None => Ok(()),
        }
    }

    /// Attach one score per row, deriving categories
    pub fn with_scores(mut self, scores: Vec<f64>) -> Result<Dataset> {
        if scores.len() != self.rows.len() {
            return Err(Error::LengthMismatch {
                expected: self.rows.len(),
                actual: scores.len(),
            });
        }
        self.ensure_unscored()?;

        for (row, (review, score)) in self.rows.iter_mut().zip(scores).enumerate() {
            review.attach_score(row, score)?;
        }
        Ok(self)
    }

    /// Rows of the given segment
    pub fn filter_user_type(&self, user_type: UserType) -> Dataset {
        self.rows
            .iter()
            .filter(|r| r.user_type == Some(user_type))
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }

    /// Rows at the given indices, in the order given
    pub fn select(&self, indices: &[usize]) -> Dataset {
        indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect::<Vec<_>>()
            .into()
    }

    /// Earliest and latest timestamp
    pub fn timestamp_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let mut stamps = self.rows.iter().filter_map(|r| r.timestamp);
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Review count per star rating
    pub fn rating_distribution(&self) -> BTreeMap<u8, usize> {
        let mut distribution = BTreeMap::new();
        for review in &self.rows {
            *distribution.entry(review.rating).or_insert(0) += 1;
        }
        distribution
    }

    /// Aggregate to one row per user
    ///
    /// Rows without a `user_id` are skipped. Within a user, reviews are
    /// ordered by timestamp (stable, untimed rows first).
    pub fn cross_sectional(&self) -> Result<Vec<UserSummary>> {
        let mut by_user: BTreeMap<&str, Vec<(DateTimeKey, u8, f64)>> = BTreeMap::new();

        for (row, review) in self.rows.iter().enumerate() {
            let Some(user_id) = review.user_id.as_deref() else {
                continue;
            };
            let sentiment = review.sentiment.ok_or(Error::MissingSentiment { row })?;
            by_user
                .entry(user_id)
                .or_default()
                .push((review.timestamp, review.rating, sentiment));
        }

        let summaries = by_user
            .into_iter()
            .map(|(user_id, mut reviews)| {
                reviews.sort_by_key(|(timestamp, _, _)| *timestamp);
                let n = reviews.len();
                let first = reviews[0];
                let last = reviews[n - 1];

                UserSummary {
                    user_id: user_id.to_string(),
                    review_count: n,
                    user_type: UserType::from_review_count(n),
                    mean_sentiment: reviews.iter().map(|r| r.2).sum::<f64>() / n as f64,
                    mean_rating: reviews.iter().map(|r| r.1 as f64).sum::<f64>() / n as f64,
                    first_sentiment: first.2,
                    last_sentiment: last.2,
                    first_rating: first.1,
                    last_rating: last.1,
                }
            })
            .collect();

        Ok(summaries)
    }
}

type DateTimeKey = Option<DateTime<Utc>>;

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ReviewRow;
    type IntoIter = std::slice::Iter<'a, ReviewRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Timestamps arrive either as epoch milliseconds or as RFC 3339 strings
mod timestamp_format {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawTimestamp>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawTimestamp::Millis(ms)) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
            Some(RawTimestamp::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(RawTimestamp::Text(text)) => DateTime::parse_from_rfc3339(text.trim())
                .map(|t| Some(t.with_timezone(&Utc)))
                .map_err(D::Error::custom),
        }
    }
}
