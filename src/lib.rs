//! # u-psychometrics
//!
//! Scale reliability statistics for respondent-by-item response data:
//! Cronbach's alpha, McDonald's omega (mean inter-item correlation form),
//! and the Total Reliability Index (TRI), which blends between-person and
//! within-person variance.
//!
//! Every computation is a pure function of a [`ResponseMatrix`]. Missing
//! responses are filtered per item, per respondent, or per item pair, never
//! imputed.
//!
//! ## Modules
//!
//! - [`descriptive`] — Mean, sample variance, covariance, Pearson correlation
//! - [`correlation`] — Covariance and correlation matrices over valid pairs
//! - [`reliability`] — Alpha, omega, TRI
//! - [`ingest`] — Delimited text to [`ResponseMatrix`]
//! - [`report`] — All coefficients in one call, display formatting
//!
//! ## Example
//!
//! ```
//! use u_psychometrics::{cronbach_alpha, mcdonald_omega, total_reliability_index, ResponseMatrix};
//!
//! let data = ResponseMatrix::example();
//! let alpha = cronbach_alpha(&data).unwrap();
//! let omega = mcdonald_omega(&data).unwrap();
//! let tri = total_reliability_index(&data).unwrap();
//! assert!(alpha > 0.8);
//! assert!((0.0..=1.0).contains(&omega.value));
//! assert!((0.0..=1.0).contains(&tri.value));
//! ```

pub mod config;
pub mod correlation;
pub mod descriptive;
pub mod error;
pub mod ingest;
pub mod reliability;
pub mod report;
pub mod response;

pub use config::ReliabilityConfig;
pub use error::{ReliabilityError, Result};
pub use reliability::{
    cronbach_alpha, mcdonald_omega, total_reliability_index, OmegaEstimate, OmegaMethod,
    TriComponents, TriResult,
};
pub use report::{format_value, ReliabilityReport};
pub use response::{Cell, ResponseMatrix};
