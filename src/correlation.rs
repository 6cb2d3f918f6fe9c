//! Inter-item covariance and correlation matrices.
//!
//! Two correlation paths are provided and they are not interchangeable:
//!
//! - [`correlation_matrix`] recomputes every entry from the item pair's
//!   valid pair set, so means and deviations are taken over exactly the rows
//!   where both items were answered.
//! - [`correlation_from_covariance`] rescales an existing covariance matrix
//!   by its diagonal. Under missing data the diagonal variances come from
//!   different row subsets than the off-diagonal covariances, so the two
//!   paths diverge. On complete data they agree.
//!
//! # Examples
//!
//! ```
//! use u_psychometrics::correlation::{correlation_from_covariance, correlation_matrix, covariance_matrix};
//! use u_psychometrics::ResponseMatrix;
//!
//! let m = ResponseMatrix::example();
//! let direct = correlation_matrix(&m).unwrap();
//! let derived = correlation_from_covariance(&covariance_matrix(&m).unwrap());
//! assert!((direct.get(0, 1) - derived.get(0, 1)).abs() < 1e-12);
//! assert_eq!(direct.get(2, 2), 1.0);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::descriptive;
use crate::error::{ReliabilityError, Result};
use crate::response::ResponseMatrix;

/// A k×k symmetric matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymmetricMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl SymmetricMatrix {
    fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; dim * dim],
        }
    }

    /// Builds a matrix from nested rows. `None` if the rows are not square
    /// or not symmetric.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let dim = rows.len();
        if rows.iter().any(|r| r.len() != dim) {
            return None;
        }
        for i in 0..dim {
            for j in (i + 1)..dim {
                if rows[i][j] != rows[j][i] {
                    return None;
                }
            }
        }
        Some(Self {
            dim,
            data: rows.iter().flatten().copied().collect(),
        })
    }

    fn set_pair(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.dim + j] = value;
        self.data[j * self.dim + i] = value;
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry (i, j).
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.dim && j < self.dim, "index ({i}, {j}) out of range");
        self.data[i * self.dim + j]
    }

    /// Diagonal entries.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.dim).map(|i| self.get(i, i)).collect()
    }

    /// Strictly upper-triangular entries, row by row.
    pub fn upper_triangle(&self) -> Vec<f64> {
        (0..self.dim)
            .flat_map(|i| ((i + 1)..self.dim).map(move |j| (i, j)))
            .map(|(i, j)| self.get(i, j))
            .collect()
    }

    /// Copies the matrix into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.dim.max(1)).map(<[f64]>::to_vec).collect()
    }
}

// ---------------------------------------------------------------------------
// Direct correlation
// ---------------------------------------------------------------------------

/// Computes the inter-item Pearson correlation matrix directly from the data.
///
/// # Algorithm
///
/// For each pair (i, j) with i < j, restrict both items to their valid pair
/// set and compute [`descriptive::correlation`]. A pair set with fewer than
/// two rows yields 0. The diagonal is 1.
///
/// # Returns
///
/// `Err(NotComputable)` if a pair with at least two valid rows still has an
/// undefined or non-finite correlation (e.g. non-finite scores).
pub fn correlation_matrix(matrix: &ResponseMatrix) -> Result<SymmetricMatrix> {
    let k = matrix.item_count();
    let mut out = SymmetricMatrix::zeros(k);

    for i in 0..k {
        out.set_pair(i, i, 1.0);
        for j in (i + 1)..k {
            let (x, y) = matrix.paired_values(i, j);
            let r = if x.len() > 1 {
                descriptive::correlation(&x, &y)
                    .filter(|r| r.is_finite())
                    .ok_or(ReliabilityError::NotComputable {
                        quantity: "inter-item correlation",
                    })?
            } else {
                0.0
            };
            out.set_pair(i, j, r);
        }
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Covariance
// ---------------------------------------------------------------------------

/// Computes the inter-item sample covariance matrix.
///
/// # Algorithm
///
/// Each unordered pair (i ≤ j) is computed once over its valid pair set and
/// mirrored. With fewer than two valid rows the entry is 0. On the diagonal
/// this means an item observed at most once has variance entry 0, so
/// [`correlation_from_covariance`] reports 0 for every pair involving it
/// while the rest of the matrix stays intact.
///
/// # Returns
///
/// `Err(NotComputable)` if a covariance over two or more rows is undefined
/// (e.g. non-finite scores).
pub fn covariance_matrix(matrix: &ResponseMatrix) -> Result<SymmetricMatrix> {
    let k = matrix.item_count();
    let mut out = SymmetricMatrix::zeros(k);

    for i in 0..k {
        for j in i..k {
            let (x, y) = matrix.paired_values(i, j);
            let cov = if x.len() > 1 {
                descriptive::covariance(&x, &y).ok_or(ReliabilityError::NotComputable {
                    quantity: "inter-item covariance",
                })?
            } else {
                if i == j {
                    debug!(item = i, observed = x.len(), "item variance undefined, using 0");
                }
                0.0
            };
            out.set_pair(i, j, cov);
        }
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Correlation from covariance
// ---------------------------------------------------------------------------

/// Rescales a covariance matrix into a correlation matrix.
///
/// r(i,j) = cov(i,j) / (sd_i · sd_j), with sd taken as √|cov(i,i)|. A
/// non-positive standard deviation yields 0. Off-diagonal results are
/// clamped to [-1, 1]; the diagonal is 1.
pub fn correlation_from_covariance(cov: &SymmetricMatrix) -> SymmetricMatrix {
    let k = cov.dim();
    let sds: Vec<f64> = cov.diagonal().iter().map(|v| v.abs().sqrt()).collect();
    let mut out = SymmetricMatrix::zeros(k);

    for i in 0..k {
        out.set_pair(i, i, 1.0);
        for j in (i + 1)..k {
            let r = if sds[i] > 0.0 && sds[j] > 0.0 {
                cov.get(i, j) / (sds[i] * sds[j])
            } else {
                0.0
            };
            out.set_pair(i, j, r.clamp(-1.0, 1.0));
        }
    }

    out
}
