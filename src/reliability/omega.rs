//! McDonald's omega, mean inter-item correlation form.

use serde::Serialize;
use tracing::{debug, warn};

use super::{checked_items, cronbach_alpha};
use crate::correlation::{correlation_matrix, SymmetricMatrix};
use crate::descriptive;
use crate::error::{defined, Result};
use crate::response::ResponseMatrix;

/// How an [`OmegaEstimate`] was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OmegaMethod {
    /// ω from the mean inter-item correlation.
    MeanInterItemCorrelation {
        /// Mean of the strictly upper-triangular correlations.
        mean_correlation: f64,
    },
    /// The correlation matrix could not be built; the value is Cronbach's
    /// alpha.
    AlphaFallback {
        /// Why the correlation path failed.
        reason: String,
    },
}

/// Omega value together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OmegaEstimate {
    /// Coefficient in [0, 1].
    pub value: f64,
    /// Estimation path.
    pub method: OmegaMethod,
}

impl OmegaEstimate {
    /// Returns `true` if the value is the alpha fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self.method, OmegaMethod::AlphaFallback { .. })
    }
}

/// Computes McDonald's omega from the mean inter-item correlation.
///
/// # Algorithm
///
/// ```text
/// r̄ = mean of r(i,j), i < j
/// ω = k·r̄ / (1 + (k−1)·r̄)
/// ```
///
/// Correlations come from [`correlation_matrix`], i.e. pairwise over valid
/// pair sets. The result is clamped to [0, 1]. This is the standardized
/// form of the Spearman-Brown prophecy applied to r̄, not a factor-model
/// omega.
///
/// If the correlation matrix cannot be built, the estimate falls back to
/// [`cronbach_alpha`] and is tagged [`OmegaMethod::AlphaFallback`].
///
/// # Errors
///
/// - `InsufficientItems` for fewer than two items.
/// - `NotComputable` if ω is NaN, or the fallback alpha is not computable.
///
/// # Examples
///
/// ```
/// use u_psychometrics::{mcdonald_omega, ResponseMatrix};
///
/// let omega = mcdonald_omega(&ResponseMatrix::example()).unwrap();
/// assert!(!omega.is_fallback());
/// assert!(omega.value > 0.9);
/// ```
pub fn mcdonald_omega(matrix: &ResponseMatrix) -> Result<OmegaEstimate> {
    let k = checked_items(matrix)?;
    omega_from_correlations(matrix, k, correlation_matrix(matrix))
}

fn omega_from_correlations(
    matrix: &ResponseMatrix,
    k: usize,
    correlations: Result<SymmetricMatrix>,
) -> Result<OmegaEstimate> {
    let corr = match correlations {
        Ok(corr) => corr,
        Err(e) => {
            warn!(error = %e, "correlation matrix failed, using cronbach's alpha for omega");
            let value = cronbach_alpha(matrix)?;
            return Ok(OmegaEstimate {
                value,
                method: OmegaMethod::AlphaFallback {
                    reason: e.to_string(),
                },
            });
        }
    };

    let mean_correlation = defined(
        descriptive::mean(&corr.upper_triangle()),
        "mean inter-item correlation",
    )?;
    let kf = k as f64;
    let omega = defined(
        Some((kf * mean_correlation) / (1.0 + (kf - 1.0) * mean_correlation)),
        "omega",
    )?
    .clamp(0.0, 1.0);

    debug!(items = k, mean_correlation, omega, "computed mcdonald's omega");
    Ok(OmegaEstimate {
        value: omega,
        method: OmegaMethod::MeanInterItemCorrelation { mean_correlation },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReliabilityError;

    #[test]
    fn omega_example_regression() {
        let omega = mcdonald_omega(&ResponseMatrix::example()).unwrap();
        assert!((omega.value - 0.9477546475881661).abs() < 1e-12, "omega = {}", omega.value);
        match omega.method {
            OmegaMethod::MeanInterItemCorrelation { mean_correlation } => {
                assert!((mean_correlation - 0.819335268110529).abs() < 1e-12);
            }
            other => panic!("unexpected method {other:?}"),
        }
    }

    #[test]
    fn omega_with_missing_cells_uses_valid_pairs() {
        let m = ResponseMatrix::example();
        let mut rows: Vec<Vec<Option<f64>>> =
            (0..10).map(|r| (0..4).map(|j| m.cell(r, j)).collect()).collect();
        rows[0][1] = None;
        rows[4][3] = None;
        let omega = mcdonald_omega(&ResponseMatrix::from_rows(rows)).unwrap();
        assert!(!omega.is_fallback());
        assert!((omega.value - 0.9543787695486777).abs() < 1e-12, "omega = {}", omega.value);
    }

    #[test]
    fn omega_single_item() {
        let m = ResponseMatrix::from_complete(&[vec![1.0], vec![2.0], vec![3.0]]);
        assert!(matches!(
            mcdonald_omega(&m),
            Err(ReliabilityError::InsufficientItems { items: 1 })
        ));
    }

    #[test]
    fn omega_constant_item_pulls_mean_correlation_down() {
        let m = ResponseMatrix::from_complete(&[
            vec![1.0, 2.0, 4.0],
            vec![2.0, 3.0, 4.0],
            vec![3.0, 5.0, 4.0],
            vec![4.0, 4.0, 4.0],
        ]);
        let omega = mcdonald_omega(&m).unwrap();
        assert!(!omega.is_fallback());
        assert!((0.0..=1.0).contains(&omega.value));
    }

    #[test]
    fn omega_falls_back_to_alpha() {
        let m = ResponseMatrix::example();
        let failed = Err(ReliabilityError::NotComputable {
            quantity: "inter-item correlation",
        });
        let omega = omega_from_correlations(&m, 4, failed).unwrap();
        assert!(omega.is_fallback());
        assert_eq!(omega.value, cronbach_alpha(&m).unwrap());
        match omega.method {
            OmegaMethod::AlphaFallback { reason } => assert!(reason.contains("inter-item correlation")),
            other => panic!("unexpected method {other:?}"),
        }
    }

    #[test]
    fn omega_non_finite_scores_are_not_computable() {
        // the correlation path fails, and so does the alpha fallback
        let m = ResponseMatrix::from_rows(vec![
            vec![Some(1.0), Some(2.0)],
            vec![Some(2.0), Some(f64::INFINITY)],
            vec![Some(3.0), Some(3.0)],
        ]);
        assert!(mcdonald_omega(&m).unwrap_err().is_not_computable());
    }

    #[test]
    fn omega_negative_mean_correlation_clamps_to_zero() {
        let m = ResponseMatrix::from_complete(&[
            vec![1.0, 5.0],
            vec![2.0, 5.0],
            vec![4.0, 2.0],
            vec![5.0, 1.0],
        ]);
        assert_eq!(mcdonald_omega(&m).unwrap().value, 0.0);
    }
}
