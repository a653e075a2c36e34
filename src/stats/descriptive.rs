//! Descriptive statistics.

use super::mean;
use serde::{Deserialize, Serialize};

/// Mean, spread and range of a numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Number of values
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n - 1); 0.0 below two values
    pub std: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl DescriptiveStats {
    /// Compute statistics, `None` for empty input
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let count = values.len();

        let std = if count < 2 {
            0.0
        } else {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (count - 1) as f64).sqrt()
        };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            count,
            mean,
            std,
            min,
            max,
        })
    }

    /// Width of the value range
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_stats() {
        let stats = DescriptiveStats::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

        assert_eq!(stats.count, 8);
        assert_relative_eq!(stats.mean, 5.0);
        // Population std is 2.0, sample std is sqrt(32 / 7)
        assert_relative_eq!(stats.std, (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.range(), 7.0);
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::compute(&[0.4]).unwrap();
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.min, 0.4);
        assert_eq!(stats.max, 0.4);
    }

    #[test]
    fn test_empty() {
        assert!(DescriptiveStats::compute(&[]).is_none());
    }
}
