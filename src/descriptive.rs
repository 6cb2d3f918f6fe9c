//! Descriptive statistics over fully observed sequences.
//!
//! Missing values are filtered by the caller (per item, per respondent, or
//! per valid pair set) before any of these functions run. Every function
//! returns `None` when its result is undefined rather than producing NaN.
//!
//! [`mean`], [`variance`], and [`covariance`] delegate to `u_numflow::stats`
//! (Kahan summation, Welford's algorithm). [`sum`] is a plain running total.
//!
//! # Examples
//!
//! ```
//! use u_psychometrics::descriptive::{correlation, covariance, mean, variance};
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let y = [2.0, 4.0, 6.0, 8.0];
//! assert_eq!(mean(&x), Some(2.5));
//! assert!((variance(&x).unwrap() - 5.0 / 3.0).abs() < 1e-12);
//! assert!((covariance(&x, &y).unwrap() - 10.0 / 3.0).abs() < 1e-12);
//! assert!((correlation(&x, &y).unwrap() - 1.0).abs() < 1e-12);
//! ```

use u_numflow::stats;

/// Arithmetic mean. `None` for an empty sequence.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    stats::mean(values)
}

/// Sample variance (denominator n − 1). `None` for n ≤ 1.
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() <= 1 {
        return None;
    }
    stats::variance(values)
}

/// Sample covariance (denominator n − 1).
///
/// `None` when the lengths differ or n ≤ 1.
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() <= 1 {
        return None;
    }
    stats::covariance(x, y)
}

/// Pearson correlation, cov(x, y) / (sd(x) · sd(y)).
///
/// Returns `Some(0.0)` when either standard deviation is ≤ 0. That zero is a
/// division guard for constant series, not evidence of independence.
/// `None` when the covariance itself is undefined.
///
/// ```
/// use u_psychometrics::descriptive::correlation;
///
/// // constant series
/// assert_eq!(correlation(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]), Some(0.0));
/// assert_eq!(correlation(&[1.0], &[2.0]), None);
/// ```
pub fn correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let cov = covariance(x, y)?;
    let sx = variance(x)?.sqrt();
    let sy = variance(y)?.sqrt();
    if sx <= 0.0 || sy <= 0.0 {
        return Some(0.0);
    }
    Some(cov / (sx * sy))
}

/// Sum of a sequence. Zero for an empty sequence.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}
