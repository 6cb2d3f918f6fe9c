//! Scale reliability coefficients.
//!
//! All three coefficients take a [`ResponseMatrix`](crate::ResponseMatrix)
//! and need at least two items. Respondent count is validated by the caller
//! (see [`ReliabilityReport`](crate::ReliabilityReport)).
//!
//! # Coefficients
//!
//! - [`cronbach_alpha`] — classical internal consistency
//! - [`mcdonald_omega`] — mean inter-item correlation approximation, with an
//!   explicit fallback to alpha
//! - [`total_reliability_index`] — between/within variance decomposition
//!
//! # Missing data
//!
//! Item variances drop missing cells per item. Total scores count a missing
//! cell as 0 rather than dropping the respondent, which enlarges the spread
//! of total scores compared to listwise deletion.
//!
//! # References
//!
//! - Cronbach, L.J. (1951). "Coefficient alpha and the internal structure of
//!   tests". *Psychometrika* 16(3), 297–334.
//! - McDonald, R.P. (1999). *Test Theory: A Unified Treatment*. Erlbaum.

mod alpha;
mod omega;
mod tri;

pub use alpha::cronbach_alpha;
pub use omega::{mcdonald_omega, OmegaEstimate, OmegaMethod};
pub use tri::{total_reliability_index, TriComponents, TriResult};

use crate::descriptive;
use crate::error::{defined, ReliabilityError, Result};
use crate::response::ResponseMatrix;

/// Item count, rejecting k ≤ 1.
fn checked_items(matrix: &ResponseMatrix) -> Result<usize> {
    let k = matrix.item_count();
    if k <= 1 {
        return Err(ReliabilityError::InsufficientItems { items: k });
    }
    Ok(k)
}

/// Sample variance of each item over its observed values.
fn item_variances(matrix: &ResponseMatrix) -> Result<Vec<f64>> {
    (0..matrix.item_count())
        .map(|j| defined(descriptive::variance(&matrix.item_values(j)), "item variance"))
        .collect()
}

/// Sample variance of the total scores (missing counted as 0). Zero is
/// treated as undefined: every ratio over it would be.
fn total_variance(matrix: &ResponseMatrix) -> Result<f64> {
    let v = defined(descriptive::variance(&matrix.row_sums()), "total variance")?;
    if v == 0.0 {
        return Err(ReliabilityError::NotComputable {
            quantity: "total variance",
        });
    }
    Ok(v)
}

/// k / (k − 1) · (1 − ratio), clamped to [0, 1].
fn scaled_complement(k: usize, ratio: f64, quantity: &'static str) -> Result<f64> {
    let k = k as f64;
    let value = defined(Some((k / (k - 1.0)) * (1.0 - ratio)), quantity)?;
    Ok(value.clamp(0.0, 1.0))
}
