//! All three coefficients in one request.
//!
//! A report is computed from one [`ResponseMatrix`] and one
//! [`ReliabilityConfig`]; nothing is cached between reports. Each
//! coefficient is evaluated independently, so a TRI that is not computable
//! does not hide a valid alpha.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::ReliabilityConfig;
use crate::error::{ReliabilityError, Result};
use crate::reliability::{
    cronbach_alpha, mcdonald_omega, total_reliability_index, OmegaEstimate, TriResult,
};
use crate::response::ResponseMatrix;

/// Alpha, omega, and TRI for one response matrix.
///
/// `None` marks a coefficient that was not computable; it is displayed as
/// `N/A`, never as 0.
#[derive(Debug, Clone, Serialize)]
pub struct ReliabilityReport {
    /// Number of respondents analyzed.
    pub respondents: usize,
    /// Item labels.
    pub items: Vec<String>,
    /// Cronbach's alpha.
    pub alpha: Option<f64>,
    /// McDonald's omega and its estimation path.
    pub omega: Option<OmegaEstimate>,
    /// Total Reliability Index with components.
    pub tri: Option<TriResult>,
    /// Display precision.
    #[serde(skip)]
    precision: usize,
}

impl ReliabilityReport {
    /// Computes every coefficient for `matrix`.
    ///
    /// # Errors
    ///
    /// - `InsufficientRows` if there are fewer respondents than
    ///   `config.min_respondents`.
    /// - `InsufficientItems` if there are fewer than two items.
    ///
    /// Other failures are per coefficient and leave that field `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_psychometrics::{ReliabilityConfig, ReliabilityReport, ResponseMatrix};
    ///
    /// let report = ReliabilityReport::compute(&ResponseMatrix::example(), &ReliabilityConfig::default()).unwrap();
    /// assert_eq!(report.display_alpha(), "0.946");
    /// ```
    pub fn compute(matrix: &ResponseMatrix, config: &ReliabilityConfig) -> Result<Self> {
        let rows = matrix.respondent_count();
        if rows < config.min_respondents {
            return Err(ReliabilityError::InsufficientRows {
                rows,
                required: config.min_respondents,
            });
        }
        let items = matrix.item_count();
        if items <= 1 {
            return Err(ReliabilityError::InsufficientItems { items });
        }

        let report = Self {
            respondents: rows,
            items: matrix.labels().to_vec(),
            alpha: computed(cronbach_alpha(matrix), "alpha"),
            omega: computed(mcdonald_omega(matrix), "omega"),
            tri: computed(total_reliability_index(matrix), "tri"),
            precision: config.precision,
        };
        debug!(
            respondents = rows,
            items,
            missing_cells = matrix.missing_count(),
            "computed reliability report"
        );
        Ok(report)
    }

    /// Alpha formatted for display.
    pub fn display_alpha(&self) -> String {
        format_value(self.alpha, self.precision)
    }

    /// Omega formatted for display.
    pub fn display_omega(&self) -> String {
        format_value(self.omega.as_ref().map(|o| o.value), self.precision)
    }

    /// TRI formatted for display.
    pub fn display_tri(&self) -> String {
        format_value(self.tri.as_ref().map(|t| t.value), self.precision)
    }
}

fn computed<T>(result: Result<T>, coefficient: &'static str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(coefficient, error = %e, "coefficient not computable");
            None
        }
    }
}

/// Formats a value with `precision` decimals, or `N/A` when absent.
///
/// ```
/// use u_psychometrics::format_value;
///
/// assert_eq!(format_value(Some(0.94573), 3), "0.946");
/// assert_eq!(format_value(None, 3), "N/A");
/// ```
pub fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.precision$}"),
        _ => "N/A".to_string(),
    }
}

impl fmt::Display for ReliabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision;
        writeln!(
            f,
            "{} respondents x {} items",
            self.respondents,
            self.items.len()
        )?;
        writeln!(f, "Total Reliability Index: {}", self.display_tri())?;
        writeln!(f, "Cronbach's alpha:        {}", self.display_alpha())?;
        write!(f, "McDonald's omega:        {}", self.display_omega())?;
        if self.omega.as_ref().is_some_and(OmegaEstimate::is_fallback) {
            write!(f, " (alpha fallback)")?;
        }
        writeln!(f)?;

        let c = self.tri.as_ref().map(|t| &t.components);
        writeln!(
            f,
            "  between-person proportion: {}",
            format_value(c.map(|c| c.between_variance_proportion), p)
        )?;
        writeln!(
            f,
            "  within-person proportion:  {}",
            format_value(c.map(|c| c.within_variance_proportion), p)
        )?;
        writeln!(
            f,
            "  error variance ratio:      {}",
            format_value(c.map(|c| c.error_variance_ratio), p)
        )?;
        writeln!(
            f,
            "  systematic variance:       {}",
            format_value(c.map(|c| c.systematic_variance), p)
        )?;
        write!(
            f,
            "  error variance:            {}",
            format_value(c.map(|c| c.error_variance), p)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_report(m: &ResponseMatrix) -> Result<ReliabilityReport> {
        ReliabilityReport::compute(m, &ReliabilityConfig::default())
    }

    #[test]
    fn example_report() {
        let r = default_report(&ResponseMatrix::example()).unwrap();
        assert_eq!(r.respondents, 10);
        assert_eq!(r.display_alpha(), "0.946");
        assert_eq!(r.display_omega(), "0.948");
        assert_eq!(r.display_tri(), "0.945");
    }

    #[test]
    fn too_few_respondents() {
        let m = ResponseMatrix::from_complete(&[vec![1.0, 2.0], vec![2.0, 3.0]]);
        assert!(matches!(
            default_report(&m),
            Err(ReliabilityError::InsufficientRows { rows: 2, required: 3 })
        ));
    }

    #[test]
    fn min_respondents_is_configurable() {
        let config = ReliabilityConfig {
            min_respondents: 20,
            ..ReliabilityConfig::default()
        };
        assert!(ReliabilityReport::compute(&ResponseMatrix::example(), &config).is_err());
    }

    #[test]
    fn single_item_report() {
        let m = ResponseMatrix::from_complete(&[vec![1.0], vec![2.0], vec![3.0]]);
        assert!(matches!(
            default_report(&m),
            Err(ReliabilityError::InsufficientItems { items: 1 })
        ));
    }

    #[test]
    fn uncomputable_tri_keeps_alpha() {
        let m = ResponseMatrix::from_rows(vec![
            vec![Some(3.0), Some(4.0), Some(3.0)],
            vec![Some(1.0), None, None],
            vec![Some(5.0), Some(5.0), Some(6.0)],
            vec![Some(4.0), Some(3.0), Some(4.0)],
        ]);
        let r = default_report(&m).unwrap();
        assert!(r.alpha.is_some());
        assert!(r.tri.is_none());
        assert_eq!(r.display_tri(), "N/A");
        assert!(r.to_string().contains("Total Reliability Index: N/A"));
    }

    #[test]
    fn precision_applies_to_display_only() {
        let config = ReliabilityConfig {
            precision: 1,
            ..ReliabilityConfig::default()
        };
        let r = ReliabilityReport::compute(&ResponseMatrix::example(), &config).unwrap();
        assert_eq!(r.display_alpha(), "0.9");
        assert!((r.alpha.unwrap() - 0.945736434108527).abs() < 1e-12);
    }

    #[test]
    fn display_lists_components() {
        let text = default_report(&ResponseMatrix::example()).unwrap().to_string();
        assert!(text.starts_with("10 respondents x 4 items"));
        assert!(text.contains("between-person proportion: 0.996"));
        assert!(!text.contains("fallback"));
    }

    #[test]
    fn serializes_to_json() {
        let r = default_report(&ResponseMatrix::example()).unwrap();
        let json: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(json["items"].as_array().unwrap().len(), 4);
        assert_eq!(json["omega"]["method"]["kind"], "mean_inter_item_correlation");
        assert!(json["tri"]["components"]["item_variances"].is_array());
        assert!(json.get("precision").is_none());
    }

    #[test]
    fn format_non_finite_is_na() {
        assert_eq!(format_value(Some(f64::NAN), 3), "N/A");
        assert_eq!(format_value(Some(0.5), 2), "0.50");
    }
}
