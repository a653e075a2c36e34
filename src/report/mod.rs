//! # Report Module
//!
//! Dataset-level sentiment summary and the printable findings report.

mod findings;
mod summary;

pub use findings::{FindingsReport, RatingShare, SegmentCorrelation, SegmentShare};
pub use summary::{BasicStats, CategoryCounts, CategoryPercentages, SummaryReport, SummaryReporter};
