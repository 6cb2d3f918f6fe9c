//! Respondent-by-item response matrix.
//!
//! A [`ResponseMatrix`] is immutable input to every computation in this
//! crate. Cells are `Option<f64>`; `None` marks a missing response. Rows may
//! be shorter than the item list (their trailing cells are missing); cells
//! past the last item are ignored.
//!
//! # Examples
//!
//! ```
//! use u_psychometrics::ResponseMatrix;
//!
//! let m = ResponseMatrix::from_rows(vec![
//!     vec![Some(3.0), Some(4.0)],
//!     vec![Some(1.0), None],
//!     vec![Some(5.0), Some(5.0)],
//! ]);
//! assert_eq!(m.item_count(), 2);
//! assert_eq!(m.item_values(1), vec![4.0, 5.0]);
//! assert_eq!(m.row_sums(), vec![7.0, 1.0, 10.0]);
//! ```

use serde::{Deserialize, Serialize};

/// A single response: a number, or `None` when missing.
pub type Cell = Option<f64>;

/// Respondents (rows) by items (columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMatrix {
    labels: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ResponseMatrix {
    /// Creates a matrix with one label per item. The item count is the
    /// number of labels.
    pub fn new(labels: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { labels, rows }
    }

    /// Creates a matrix whose item count is the width of the first row,
    /// labelled `Item1..Itemk`.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let k = rows.first().map_or(0, Vec::len);
        let labels = (1..=k).map(|i| format!("Item{i}")).collect();
        Self { labels, rows }
    }

    /// Creates a fully observed matrix from plain numbers.
    pub fn from_complete(rows: &[Vec<f64>]) -> Self {
        Self::from_rows(
            rows.iter()
                .map(|r| r.iter().copied().map(Some).collect())
                .collect(),
        )
    }

    /// The 10 respondents × 4 items demonstration dataset.
    pub fn example() -> Self {
        const DATA: [[f64; 4]; 10] = [
            [3.0, 4.0, 3.0, 2.0],
            [1.0, 1.0, 2.0, 1.0],
            [5.0, 5.0, 6.0, 4.0],
            [4.0, 3.0, 4.0, 3.0],
            [2.0, 2.0, 3.0, 2.0],
            [3.0, 4.0, 4.0, 3.0],
            [4.0, 5.0, 6.0, 5.0],
            [5.0, 5.0, 4.0, 4.0],
            [2.0, 3.0, 2.0, 3.0],
            [3.0, 2.0, 3.0, 2.0],
        ];
        let rows: Vec<Vec<f64>> = DATA.iter().map(|r| r.to_vec()).collect();
        Self::from_complete(&rows)
    }

    /// Number of items (k).
    pub fn item_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of respondents.
    pub fn respondent_count(&self) -> usize {
        self.rows.len()
    }

    /// Item labels, one per column.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Cell at respondent `r`, item `j`. Out-of-range cells are missing.
    pub fn cell(&self, r: usize, j: usize) -> Cell {
        if j >= self.item_count() {
            return None;
        }
        self.rows.get(r).and_then(|row| row.get(j).copied().flatten())
    }

    /// Non-missing values of item `j`, in respondent order.
    pub fn item_values(&self, j: usize) -> Vec<f64> {
        (0..self.respondent_count())
            .filter_map(|r| self.cell(r, j))
            .collect()
    }

    /// Non-missing values of respondent `r` across the items.
    pub fn respondent_values(&self, r: usize) -> Vec<f64> {
        (0..self.item_count())
            .filter_map(|j| self.cell(r, j))
            .collect()
    }

    /// Paired values of items `i` and `j` over the rows where both are
    /// present (the valid pair set).
    pub fn paired_values(&self, i: usize, j: usize) -> (Vec<f64>, Vec<f64>) {
        (0..self.respondent_count())
            .filter_map(|r| Some((self.cell(r, i)?, self.cell(r, j)?)))
            .unzip()
    }

    /// Per-respondent total score. Missing cells contribute 0.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.respondent_count())
            .map(|r| (0..self.item_count()).filter_map(|j| self.cell(r, j)).sum())
            .collect()
    }

    /// Number of missing cells within the item columns.
    pub fn missing_count(&self) -> usize {
        let k = self.item_count();
        (0..self.respondent_count())
            .map(|r| (0..k).filter(|&j| self.cell(r, j).is_none()).count())
            .sum()
    }
}
