//! Total Reliability Index (TRI).
//!
//! TRI extends the alpha ratio with a within-person term: the mean variance
//! of each respondent's own answers, scaled by the ratio of mean item
//! variance to total score variance, is added to both sides of the ratio.

use serde::Serialize;
use tracing::debug;

use super::{checked_items, item_variances, scaled_complement, total_variance};
use crate::descriptive;
use crate::error::{defined, ReliabilityError, Result};
use crate::response::ResponseMatrix;

/// TRI variance decomposition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriComponents {
    /// Σ item variances / numerator.
    pub between_variance_proportion: f64,
    /// Adjusted within-person variance / numerator.
    pub within_variance_proportion: f64,
    /// Equal to the TRI value.
    pub systematic_variance: f64,
    /// 1 − TRI.
    pub error_variance: f64,
    /// Mean item variance / total score variance.
    pub error_variance_ratio: f64,
    /// Sample variance of each item.
    pub item_variances: Vec<f64>,
    /// Sample variance of the total scores (missing counted as 0).
    pub total_variance: f64,
    /// Mean over respondents of the variance of their own answers.
    pub mean_within_variance: f64,
    /// Mean within variance × error variance ratio.
    pub adjusted_within_variance: f64,
}

/// TRI with its full component breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriResult {
    /// Index in [0, 1].
    pub value: f64,
    /// Decomposition used to compute and report the index.
    pub components: TriComponents,
}

/// Computes the Total Reliability Index.
///
/// # Algorithm
///
/// ```text
/// σ²ᵢ    item variances (observed values per item)
/// σ²_T   total score variance (missing = 0)
/// σ²_w   mean over respondents of the variance of their observed answers
/// e      = mean(σ²ᵢ) / σ²_T
/// a      = σ²_w · e
/// TRI    = k/(k−1) · (1 − (Σσ²ᵢ + a) / (σ²_T + a))
/// ```
///
/// Clamped to [0, 1].
///
/// # Errors
///
/// - `InsufficientItems` for fewer than two items.
/// - `NotComputable` when an item has fewer than two observations, a
///   respondent answered fewer than two items, or the total score variance
///   is zero.
///
/// # Examples
///
/// ```
/// use u_psychometrics::{total_reliability_index, ResponseMatrix};
///
/// let tri = total_reliability_index(&ResponseMatrix::example()).unwrap();
/// assert!(tri.value > 0.9);
/// let c = &tri.components;
/// assert!((c.between_variance_proportion + c.within_variance_proportion - 1.0).abs() < 1e-12);
/// ```
pub fn total_reliability_index(matrix: &ResponseMatrix) -> Result<TriResult> {
    let k = checked_items(matrix)?;
    let item_vars = item_variances(matrix)?;
    let total = total_variance(matrix)?;

    let within: Vec<f64> = (0..matrix.respondent_count())
        .map(|r| {
            defined(
                descriptive::variance(&matrix.respondent_values(r)),
                "within-respondent variance",
            )
        })
        .collect::<Result<_>>()?;

    let mean_item_variance = defined(descriptive::mean(&item_vars), "mean item variance")?;
    let mean_within_variance = defined(descriptive::mean(&within), "mean within variance")?;

    let error_variance_ratio = mean_item_variance / total;
    let adjusted_within_variance = mean_within_variance * error_variance_ratio;

    let item_sum = descriptive::sum(&item_vars);
    let numerator = item_sum + adjusted_within_variance;
    let denominator = total + adjusted_within_variance;

    let value = scaled_complement(k, numerator / denominator, "total reliability index")?;

    let between_variance_proportion = item_sum / numerator;
    let within_variance_proportion = adjusted_within_variance / numerator;
    if !between_variance_proportion.is_finite() || !within_variance_proportion.is_finite() {
        return Err(ReliabilityError::NotComputable {
            quantity: "variance proportions",
        });
    }

    debug!(
        items = k,
        tri = value,
        error_variance_ratio,
        mean_within_variance,
        "computed total reliability index"
    );

    Ok(TriResult {
        value,
        components: TriComponents {
            between_variance_proportion,
            within_variance_proportion,
            systematic_variance: value,
            error_variance: 1.0 - value,
            error_variance_ratio,
            item_variances: item_vars,
            total_variance: total,
            mean_within_variance,
            adjusted_within_variance,
        },
    })
}
