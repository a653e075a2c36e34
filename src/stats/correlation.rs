//! Pearson product-moment correlation.

use super::mean;

/// Pearson correlation coefficient of two sequences
///
/// Computed directly: means first, then the sum of centered cross-products
/// over the square root of the product of centered sums of squares.
///
/// Returns 0.0 when the lengths differ, when there are fewer than two
/// points, or when either sequence is constant.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n < 2 {
        return 0.0;
    }

    let (Some(x_mean), Some(y_mean)) = (mean(x), mean(y)) else {
        return 0.0;
    };

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    if sum_sq_x == 0.0 || sum_sq_y == 0.0 {
        return 0.0;
    }

    (numerator / (sum_sq_x * sum_sq_y).sqrt()).clamp(-1.0, 1.0)
}
