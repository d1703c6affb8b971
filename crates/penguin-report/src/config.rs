//! Configuration types for the report pipeline.
//!
//! Every field has a fixed default so a run without any configuration
//! reproduces the canonical output layout. Use [`ReportConfig::builder()`]
//! to override individual values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory for generated chart images.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default path of the markdown report, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "penguins_analysis.md";

/// Default location of the bundled dataset repository copy.
pub const DEFAULT_BUNDLED_DATASET: &str = "data/penguins.csv";

/// Public CSV used when neither local copy can be read.
pub const DEFAULT_REMOTE_URL: &str =
    "https://raw.githubusercontent.com/allisonhorst/palmerpenguins/master/inst/extdata/penguins.csv";

/// Default chart resolution.
pub const DEFAULT_DPI: u32 = 150;

/// Default number of rows in the head table.
pub const DEFAULT_HEAD_ROWS: usize = 10;

/// Default seed for strip plot jitter.
pub const DEFAULT_JITTER_SEED: u64 = 42;

/// Configuration for the report pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use penguin_report::config::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .output_dir("charts")
///     .report_path("report.md")
///     .dpi(100)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory receiving the chart images.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// Path of the markdown document.
    /// Default: "penguins_analysis.md"
    pub report_path: PathBuf,

    /// Resolution used to convert figure inches to pixels.
    /// Default: 150
    pub dpi: u32,

    /// Number of rows shown in the head table.
    /// Default: 10
    pub head_rows: usize,

    /// First dataset source: the bundled dataset repository copy.
    pub bundled_dataset_path: PathBuf,

    /// Last dataset source: remote CSV fetched over HTTP.
    pub remote_dataset_url: String,

    /// Seed for the strip plot jitter, keeps output reproducible.
    /// Default: 42
    pub jitter_seed: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            dpi: DEFAULT_DPI,
            head_rows: DEFAULT_HEAD_ROWS,
            bundled_dataset_path: PathBuf::from(DEFAULT_BUNDLED_DATASET),
            remote_dataset_url: DEFAULT_REMOTE_URL.to_string(),
            jitter_seed: DEFAULT_JITTER_SEED,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.dpi == 0 || self.dpi > 1200 {
            return Err(ConfigValidationError::InvalidDpi(self.dpi));
        }

        if self.head_rows == 0 {
            return Err(ConfigValidationError::InvalidHeadRows(self.head_rows));
        }

        let url = self.remote_dataset_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidUrl(
                self.remote_dataset_url.clone(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid dpi: {0} (must be between 1 and 1200)")]
    InvalidDpi(u32),

    #[error("Invalid head rows: {0} (must be at least 1)")]
    InvalidHeadRows(usize),

    #[error("Invalid remote dataset url '{0}' (must start with http:// or https://)")]
    InvalidUrl(String),
}

impl From<ConfigValidationError> for crate::error::ReportError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::ReportError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    output_dir: Option<PathBuf>,
    report_path: Option<PathBuf>,
    dpi: Option<u32>,
    head_rows: Option<usize>,
    bundled_dataset_path: Option<PathBuf>,
    remote_dataset_url: Option<String>,
    jitter_seed: Option<u64>,
}

impl ReportConfigBuilder {
    /// Set the directory for chart images.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the markdown report path.
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Set the chart resolution in dots per inch.
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Set the number of rows in the head table.
    pub fn head_rows(mut self, rows: usize) -> Self {
        self.head_rows = Some(rows);
        self
    }

    /// Set the path of the bundled dataset copy (first source).
    pub fn bundled_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bundled_dataset_path = Some(path.into());
        self
    }

    /// Set the remote CSV url (last source).
    pub fn remote_dataset_url(mut self, url: impl Into<String>) -> Self {
        self.remote_dataset_url = Some(url.into());
        self
    }

    /// Set the jitter seed for the strip plot.
    pub fn jitter_seed(mut self, seed: u64) -> Self {
        self.jitter_seed = Some(seed);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let defaults = ReportConfig::default();
        let config = ReportConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            report_path: self.report_path.unwrap_or(defaults.report_path),
            dpi: self.dpi.unwrap_or(defaults.dpi),
            head_rows: self.head_rows.unwrap_or(defaults.head_rows),
            bundled_dataset_path: self
                .bundled_dataset_path
                .unwrap_or(defaults.bundled_dataset_path),
            remote_dataset_url: self
                .remote_dataset_url
                .unwrap_or(defaults.remote_dataset_url),
            jitter_seed: self.jitter_seed.unwrap_or(defaults.jitter_seed),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.report_path, PathBuf::from("penguins_analysis.md"));
        assert_eq!(config.dpi, 150);
        assert_eq!(config.head_rows, 10);
        assert!(config.remote_dataset_url.ends_with("penguins.csv"));
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = ReportConfig::builder().build().unwrap();
        let default = ReportConfig::default();
        assert_eq!(built.output_dir, default.output_dir);
        assert_eq!(built.bundled_dataset_path, default.bundled_dataset_path);
        assert_eq!(built.jitter_seed, default.jitter_seed);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ReportConfig::builder()
            .output_dir("charts")
            .report_path("out/report.md")
            .dpi(72)
            .head_rows(5)
            .build()
            .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.report_path, PathBuf::from("out/report.md"));
        assert_eq!(config.dpi, 72);
        assert_eq!(config.head_rows, 5);
    }

    #[test]
    fn test_validation_invalid_dpi() {
        let result = ReportConfig::builder().dpi(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidDpi(0)
        ));
    }

    #[test]
    fn test_validation_invalid_url() {
        let result = ReportConfig::builder()
            .remote_dataset_url("ftp://example.com/penguins.csv")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "output_dir": "figures",
            "report_path": "eda.md",
            "dpi": 96,
            "head_rows": 3,
            "bundled_dataset_path": "a.csv",
            "remote_dataset_url": "https://example.com/penguins.csv",
            "jitter_seed": 7
        }"#;

        let config: ReportConfig = serde_json::from_str(json).expect("valid config json");
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert_eq!(config.dpi, 96);
        assert_eq!(config.jitter_seed, 7);
        assert!(config.validate().is_ok());
    }
}
