//! Error taxonomy for reliability computations.
//!
//! Local numeric degeneracies (constant items, sparse overlap between items)
//! are absorbed by the statistics layer and never surface here. What does
//! surface is a final quantity that cannot be defined, or input that is too
//! small to analyze.

use thiserror::Error;

/// Unified error type for reliability analysis.
#[derive(Debug, Error)]
pub enum ReliabilityError {
    /// Fewer than two items; no reliability coefficient is defined.
    #[error("insufficient items: need at least 2, got {items}")]
    InsufficientItems {
        /// Number of item columns supplied.
        items: usize,
    },

    /// Fewer respondents than the configured minimum.
    #[error("insufficient respondents: need at least {required}, got {rows}")]
    InsufficientRows {
        /// Number of respondent rows supplied.
        rows: usize,
        /// Configured minimum.
        required: usize,
    },

    /// A required quantity is undefined (zero or undefined variance, NaN
    /// ratio).
    #[error("not computable: {quantity} is undefined")]
    NotComputable {
        /// Name of the quantity that could not be computed.
        quantity: &'static str,
    },

    /// Malformed tabular input or configuration.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O failure while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReliabilityError {
    /// Returns `true` for the "cannot compute" family: too few items or an
    /// undefined quantity.
    pub fn is_not_computable(&self) -> bool {
        matches!(
            self,
            ReliabilityError::InsufficientItems { .. } | ReliabilityError::NotComputable { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReliabilityError>;

/// Converts an intermediate `Option` or NaN into `NotComputable`.
pub(crate) fn defined(value: Option<f64>, quantity: &'static str) -> Result<f64> {
    match value {
        Some(v) if !v.is_nan() => Ok(v),
        _ => Err(ReliabilityError::NotComputable { quantity }),
    }
}
