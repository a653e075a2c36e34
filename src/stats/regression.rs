//! Single-predictor ordinary least squares.

use super::mean;
use serde::{Deserialize, Serialize};

/// Fitted line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Coefficient on the predictor
    pub slope: f64,
    /// Intercept term
    pub intercept: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Number of points
    pub n: usize,
}

impl LinearFit {
    /// Fit by least squares
    ///
    /// `None` for unequal lengths, fewer than two points or constant `x`.
    /// `r_squared` is 0.0 when `y` is constant.
    pub fn fit(x: &[f64], y: &[f64]) -> Option<Self> {
        let n = x.len();
        if n != y.len() || n < 2 {
            return None;
        }
        let x_mean = mean(x)?;
        let y_mean = mean(y)?;

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for (xi, yi) in x.iter().zip(y) {
            sxy += (xi - x_mean) * (yi - y_mean);
            sxx += (xi - x_mean).powi(2);
        }
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
        let ss_res: f64 = x
            .iter()
            .zip(y)
            .map(|(xi, yi)| (yi - (intercept + slope * xi)).powi(2))
            .sum();
        let r_squared = if ss_tot == 0.0 {
            0.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Some(Self {
            slope,
            intercept,
            r_squared,
            n,
        })
    }

    /// Predicted `y` at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
