//! Analysis configuration.
//!
//! Defines the YAML-serializable settings that bound the exponential key
//! search and select which optional report sections are produced.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! limits:
//!   max_key_search_attributes: 16
//! report:
//!   include_superkeys: true
//!   include_cover_steps: true
//!   include_decomposition: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Default upper bound on universe size for key and superkey search.
pub const DEFAULT_MAX_KEY_SEARCH_ATTRIBUTES: usize = 16;

/// Limits on the exponential parts of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest universe the key search will run on.
    pub max_key_search_attributes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_key_search_attributes: DEFAULT_MAX_KEY_SEARCH_ATTRIBUTES,
        }
    }
}

/// Optional sections of the full analysis report.
///
/// # Examples
///
/// ```
/// # use relnorm_report::ReportSections;
/// let sections = ReportSections {
///     include_superkeys: false,
///     ..ReportSections::default()
/// };
/// assert!(sections.include_decomposition);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSections {
    pub include_superkeys: bool,
    pub include_cover_steps: bool,
    pub include_decomposition: bool,
}

impl Default for ReportSections {
    fn default() -> Self {
        Self {
            include_superkeys: true,
            include_cover_steps: true,
            include_decomposition: true,
        }
    }
}

/// Top-level analysis configuration.
///
/// Every section is optional in YAML; missing values fall back to
/// [`AnalysisConfig::default`].
///
/// # Examples
///
/// ```no_run
/// use relnorm_report::AnalysisConfig;
///
/// let config = AnalysisConfig::load("relnorm.yml").unwrap();
/// println!("key search limit: {}", config.limits.max_key_search_attributes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    pub limits: LimitsConfig,
    pub report: ReportSections,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            limits: LimitsConfig::default(),
            report: ReportSections::default(),
        }
    }
}

impl AnalysisConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ReportError::Io) if the file cannot be read, or
    /// [`Yaml`](ReportError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ReportError::Io) if the file cannot be written, or
    /// [`Yaml`](ReportError::Yaml) if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Fails if a universe of `attributes` is too large for key search.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relnorm_report::AnalysisConfig;
    /// let config = AnalysisConfig::default();
    /// assert!(config.check_attribute_limit(16).is_ok());
    /// assert!(config.check_attribute_limit(17).is_err());
    /// ```
    pub fn check_attribute_limit(&self, attributes: usize) -> Result<()> {
        let limit = self.limits.max_key_search_attributes;
        if attributes > limit {
            return Err(ReportError::AttributeLimitExceeded { attributes, limit });
        }
        Ok(())
    }
}
