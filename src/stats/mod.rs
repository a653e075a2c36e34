//! # Statistics Module
//!
//! Hand-rolled statistics over score and rating columns.

mod correlation;
mod descriptive;
mod regression;

pub use correlation::correlation;
pub use descriptive::DescriptiveStats;
pub use regression::LinearFit;

/// Arithmetic mean, `None` for empty input
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
