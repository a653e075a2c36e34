//! # Findings Report
//!
//! Key findings over a scored dataset, rendered as plain text by `Display`.

use super::summary::{SummaryReport, SummaryReporter};
use crate::data::{Dataset, UserType};
use crate::error::Result;
use crate::sentiment::SentimentCategory;
use crate::stats::{correlation, LinearFit};
use crate::validation::{ValidationEngine, ValidationReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Reviews per star rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingShare {
    pub rating: u8,
    pub count: usize,
    pub percentage: f64,
}

/// Sentiment/rating correlation within one reviewer segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentCorrelation {
    pub user_type: UserType,
    pub reviews: usize,
    pub correlation: f64,
}

/// Users per reviewer segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentShare {
    pub user_type: UserType,
    pub count: usize,
    pub percentage: f64,
}

/// Key findings over a scored dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingsReport {
    pub total_reviews: usize,
    pub total_users: usize,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub summary: SummaryReport,
    pub rating_distribution: Vec<RatingShare>,
    pub overall_correlation: f64,
    pub segment_correlations: Vec<SegmentCorrelation>,
    pub validation: ValidationReport,
    /// Rating regressed on sentiment over all reviews
    pub sentiment_to_rating: Option<LinearFit>,
    /// Rating change regressed on sentiment change over multi-review users
    pub sentiment_change_to_rating_change: Option<LinearFit>,
    pub user_segments: Vec<SegmentShare>,
}

impl FindingsReport {
    /// Collect findings from a scored dataset
    pub fn build(dataset: &Dataset, validator: &ValidationEngine) -> Result<Self> {
        let summary = SummaryReporter::new().summarize(dataset)?;
        let validation = validator.validate(dataset)?;
        let users = dataset.cross_sectional()?;

        let sentiments = dataset.sentiments()?;
        let ratings = dataset.ratings();
        let total_reviews = dataset.len();

        let rating_distribution = dataset
            .rating_distribution()
            .into_iter()
            .map(|(rating, count)| RatingShare {
                rating,
                count,
                percentage: count as f64 / total_reviews as f64 * 100.0,
            })
            .collect();

        // Rows without an explicit segment take the one derived from their user
        let derived: HashMap<&str, UserType> = users
            .iter()
            .map(|u| (u.user_id.as_str(), u.user_type))
            .collect();
        let segment_of = |i: usize| {
            let row = &dataset.rows()[i];
            row.user_type.or_else(|| {
                row.user_id
                    .as_deref()
                    .and_then(|id| derived.get(id).copied())
            })
        };

        let segment_correlations = UserType::ALL
            .iter()
            .filter_map(|&user_type| {
                let (x, y): (Vec<f64>, Vec<f64>) = (0..total_reviews)
                    .filter(|&i| segment_of(i) == Some(user_type))
                    .map(|i| (sentiments[i], ratings[i]))
                    .unzip();
                (!x.is_empty()).then(|| SegmentCorrelation {
                    user_type,
                    reviews: x.len(),
                    correlation: correlation(&x, &y),
                })
            })
            .collect();

        let multi: Vec<_> = users
            .iter()
            .filter(|u| u.user_type == UserType::Multi)
            .collect();
        let sentiment_changes: Vec<f64> = multi.iter().map(|u| u.sentiment_change()).collect();
        let rating_changes: Vec<f64> = multi.iter().map(|u| u.rating_change()).collect();

        let user_segments = if users.is_empty() {
            Vec::new()
        } else {
            UserType::ALL
                .iter()
                .map(|&user_type| {
                    let count = users.iter().filter(|u| u.user_type == user_type).count();
                    SegmentShare {
                        user_type,
                        count,
                        percentage: count as f64 / users.len() as f64 * 100.0,
                    }
                })
                .collect()
        };

        Ok(Self {
            total_reviews,
            total_users: users.len(),
            date_range: dataset.timestamp_range(),
            summary,
            rating_distribution,
            overall_correlation: correlation(&sentiments, &ratings),
            segment_correlations,
            validation,
            sentiment_to_rating: LinearFit::fit(&sentiments, &ratings),
            sentiment_change_to_rating_change: LinearFit::fit(&sentiment_changes, &rating_changes),
            user_segments,
        })
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(30))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for FindingsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "PRODUCT REVIEW SENTIMENT ANALYSIS - KEY FINDINGS")?;
        writeln!(f, "{}", "=".repeat(60))?;

        section(f, "DATA OVERVIEW")?;
        writeln!(f, "Total Reviews: {}", self.total_reviews)?;
        writeln!(f, "Total Users: {}", self.total_users)?;
        if let Some((first, last)) = self.date_range {
            writeln!(f, "Date Range: {} to {}", first.to_rfc3339(), last.to_rfc3339())?;
        }

        let stats = &self.summary.basic_stats;
        section(f, "SENTIMENT DISTRIBUTION")?;
        writeln!(f, "Mean Sentiment: {:.3}", stats.mean_sentiment)?;
        writeln!(
            f,
            "Sentiment Range: [{:.3}, {:.3}]",
            stats.min_sentiment, stats.max_sentiment
        )?;
        writeln!(f, "Sentiment Categories:")?;
        for category in SentimentCategory::ALL {
            writeln!(
                f,
                "  {}: {:.1}%",
                capitalize(category.as_str()),
                self.summary.percentages.get(category)
            )?;
        }

        section(f, "RATING DISTRIBUTION")?;
        for share in &self.rating_distribution {
            writeln!(
                f,
                "  {} stars: {} ({:.1}%)",
                share.rating, share.count, share.percentage
            )?;
        }

        section(f, "KEY CORRELATIONS")?;
        writeln!(
            f,
            "Overall Sentiment-Rating Correlation: {:.4}",
            self.overall_correlation
        )?;
        for segment in &self.segment_correlations {
            writeln!(
                f,
                "{}-review Users Correlation: {:.4}",
                capitalize(segment.user_type.as_str()),
                segment.correlation
            )?;
        }

        let v = &self.validation;
        section(f, "VALIDATION")?;
        writeln!(f, "Sample Size: {}", v.sample_size)?;
        writeln!(f, "Sample Correlation: {:.4}", v.correlation)?;
        writeln!(
            f,
            "Anomaly Rate: {:.2}% ({} high-rating negative, {} low-rating positive)",
            v.anomaly_rate * 100.0,
            v.high_rating_negative,
            v.low_rating_positive
        )?;

        if self.sentiment_to_rating.is_some() || self.sentiment_change_to_rating_change.is_some() {
            section(f, "MODEL PERFORMANCE")?;
            if let Some(fit) = &self.sentiment_to_rating {
                writeln!(f, "Sentiment -> Rating Model:")?;
                writeln!(f, "  Coefficient: {:.4}", fit.slope)?;
                writeln!(f, "  R-squared: {:.4}", fit.r_squared)?;
            }
            if let Some(fit) = &self.sentiment_change_to_rating_change {
                writeln!(f, "Sentiment Change -> Rating Change Model:")?;
                writeln!(f, "  Coefficient: {:.4}", fit.slope)?;
                writeln!(f, "  R-squared: {:.4}", fit.r_squared)?;
            }
        }

        if !self.user_segments.is_empty() {
            section(f, "USER SEGMENTATION")?;
            for segment in &self.user_segments {
                writeln!(
                    f,
                    "  {}-review users: {} ({:.1}%)",
                    capitalize(segment.user_type.as_str()),
                    segment.count,
                    segment.percentage
                )?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", "=".repeat(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReviewRow;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 3, day, 9, 0, 0).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            ReviewRow::new("a", 5).with_user_id("u1").with_timestamp(at(1)),
            ReviewRow::new("b", 2).with_user_id("u1").with_timestamp(at(4)),
            ReviewRow::new("c", 1).with_user_id("u2").with_timestamp(at(2)),
            ReviewRow::new("d", 4).with_user_id("u3").with_timestamp(at(3)),
            ReviewRow::new("e", 3).with_user_id("u4").with_timestamp(at(5)),
            ReviewRow::new("f", 5).with_user_id("u4").with_timestamp(at(6)),
        ])
        .with_scores(vec![0.8, -0.3, -0.7, 0.6, 0.0, 0.9])
        .unwrap()
    }

    #[test]
    fn test_build_findings() {
        let report = FindingsReport::build(&dataset(), &ValidationEngine::default()).unwrap();

        assert_eq!(report.total_reviews, 6);
        assert_eq!(report.total_users, 4);
        assert_eq!(report.date_range, Some((at(1), at(6))));
        assert_eq!(report.validation.sample_size, 6);

        let ratings: Vec<u8> = report.rating_distribution.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![1, 2, 3, 4, 5]);
        let pct: f64 = report.rating_distribution.iter().map(|r| r.percentage).sum();
        assert_abs_diff_eq!(pct, 100.0, epsilon = 1e-9);

        // u1 and u4 are multi-review users, u2 and u3 single
        assert_eq!(report.segment_correlations.len(), 2);
        let multi = report
            .segment_correlations
            .iter()
            .find(|s| s.user_type == UserType::Multi)
            .unwrap();
        assert_eq!(multi.reviews, 4);

        assert_eq!(report.user_segments[0].count, 2);
        assert_eq!(report.user_segments[1].count, 2);
        assert!(report.sentiment_to_rating.unwrap().slope > 0.0);
        assert_eq!(report.sentiment_change_to_rating_change.unwrap().n, 2);
    }

    #[test]
    fn test_display_sections() {
        let report = FindingsReport::build(&dataset(), &ValidationEngine::default()).unwrap();
        let text = report.to_string();

        assert!(text.contains("DATA OVERVIEW"));
        assert!(text.contains("Total Reviews: 6"));
        assert!(text.contains("Positive: 50.0%"));
        assert!(text.contains("Multi-review Users Correlation"));
        assert!(text.contains("USER SEGMENTATION"));
    }

    #[test]
    fn test_without_user_ids() {
        let dataset = Dataset::new(vec![ReviewRow::new("a", 5), ReviewRow::new("b", 1)])
            .with_scores(vec![0.5, -0.5])
            .unwrap();

        let report = FindingsReport::build(&dataset, &ValidationEngine::default()).unwrap();

        assert_eq!(report.total_users, 0);
        assert!(report.segment_correlations.is_empty());
        assert!(report.user_segments.is_empty());
        assert!(report.sentiment_change_to_rating_change.is_none());
        assert!(!report.to_string().contains("USER SEGMENTATION"));
    }
}
