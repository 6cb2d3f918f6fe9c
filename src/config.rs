//! Analysis configuration.
//!
//! ```
//! use u_psychometrics::ReliabilityConfig;
//!
//! let config = ReliabilityConfig::from_toml_str("min_respondents = 5").unwrap();
//! assert_eq!(config.min_respondents, 5);
//! assert_eq!(config.precision, 3);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReliabilityError, Result};

/// Settings for [`ReliabilityReport`](crate::ReliabilityReport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReliabilityConfig {
    /// Minimum number of respondents required to compute any index.
    pub min_respondents: usize,
    /// Decimal places used when displaying values. Computation always uses
    /// full precision.
    pub precision: usize,
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            min_respondents: 3,
            precision: 3,
        }
    }
}

impl ReliabilityConfig {
    /// Parses a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ReliabilityError::Parse(e.to_string()))
    }

    /// Reads a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults() {
        let c = ReliabilityConfig::default();
        assert_eq!(c.min_respondents, 3);
        assert_eq!(c.precision, 3);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            ReliabilityConfig::from_toml_str("").unwrap(),
            ReliabilityConfig::default()
        );
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(
            ReliabilityConfig::from_toml_str("precison = 2"),
            Err(ReliabilityError::Parse(_))
        ));
    }

    #[test]
    fn from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "min_respondents = 10").unwrap();
        writeln!(file, "precision = 2").unwrap();
        file.flush().unwrap();

        let c = ReliabilityConfig::from_file(file.path()).unwrap();
        assert_eq!(c.min_respondents, 10);
        assert_eq!(c.precision, 2);
    }
}
