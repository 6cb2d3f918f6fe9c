//! Cronbach's alpha.

use tracing::debug;

use super::{checked_items, item_variances, scaled_complement, total_variance};
use crate::descriptive;
use crate::error::Result;
use crate::response::ResponseMatrix;

/// Computes Cronbach's alpha.
///
/// # Algorithm
///
/// ```text
/// α = k/(k−1) · (1 − Σσ²ᵢ / σ²_total)
/// ```
///
/// σ²ᵢ is the sample variance of item i over its observed values. σ²_total
/// is the sample variance of the respondents' total scores, where a missing
/// cell adds 0. The result is clamped to [0, 1].
///
/// # Errors
///
/// - `InsufficientItems` for fewer than two items.
/// - `NotComputable` when an item has fewer than two observations or the
///   total score variance is zero.
///
/// # Examples
///
/// ```
/// use u_psychometrics::{cronbach_alpha, ResponseMatrix};
///
/// let alpha = cronbach_alpha(&ResponseMatrix::example()).unwrap();
/// assert!(alpha > 0.8);
/// ```
pub fn cronbach_alpha(matrix: &ResponseMatrix) -> Result<f64> {
    let k = checked_items(matrix)?;
    let item_vars = item_variances(matrix)?;
    let total = total_variance(matrix)?;

    let alpha = scaled_complement(k, descriptive::sum(&item_vars) / total, "alpha")?;
    debug!(items = k, alpha, "computed cronbach's alpha");
    Ok(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReliabilityError;

    #[test]
    fn alpha_example_regression() {
        let alpha = cronbach_alpha(&ResponseMatrix::example()).unwrap();
        assert!((alpha - 0.945736434108527).abs() < 1e-12, "alpha = {alpha}");
    }

    #[test]
    fn alpha_single_item() {
        let m = ResponseMatrix::from_complete(&[vec![1.0], vec![2.0], vec![3.0]]);
        assert!(matches!(
            cronbach_alpha(&m),
            Err(ReliabilityError::InsufficientItems { items: 1 })
        ));
    }

    #[test]
    fn alpha_parallel_items_is_one() {
        let m = ResponseMatrix::from_complete(&[
            vec![1.0, 1.0, 1.0],
            vec![2.0, 2.0, 2.0],
            vec![4.0, 4.0, 4.0],
            vec![5.0, 5.0, 5.0],
        ]);
        assert!((cronbach_alpha(&m).unwrap() - 1.0).abs() < 1e-12);
    }

    fn example_rows() -> Vec<Vec<Option<f64>>> {
        let m = ResponseMatrix::example();
        (0..10).map(|r| (0..4).map(|j| m.cell(r, j)).collect()).collect()
    }

    #[test]
    fn alpha_with_constant_item() {
        let mut rows = example_rows();
        for row in &mut rows {
            row[3] = Some(7.0);
        }
        let alpha = cronbach_alpha(&ResponseMatrix::from_rows(rows)).unwrap();
        assert!((alpha - 0.8229243203526818).abs() < 1e-12, "alpha = {alpha}");
    }

    #[test]
    fn alpha_missing_counts_zero_in_total() {
        let mut rows = example_rows();
        rows[0][1] = None;
        rows[4][3] = None;
        let alpha = cronbach_alpha(&ResponseMatrix::from_rows(rows)).unwrap();
        assert!((alpha - 0.9957457457457457).abs() < 1e-12, "alpha = {alpha}");
    }

    #[test]
    fn alpha_zero_total_variance() {
        let m = ResponseMatrix::from_complete(&[
            vec![3.0, 3.0],
            vec![3.0, 3.0],
            vec![3.0, 3.0],
        ]);
        assert!(matches!(
            cronbach_alpha(&m),
            Err(ReliabilityError::NotComputable { quantity: "total variance" })
        ));
    }

    #[test]
    fn alpha_negative_consistency_clamps_to_zero() {
        let m = ResponseMatrix::from_complete(&[
            vec![1.0, 5.0],
            vec![2.0, 5.0],
            vec![4.0, 2.0],
            vec![5.0, 1.0],
        ]);
        assert_eq!(cronbach_alpha(&m).unwrap(), 0.0);
    }
}
