//! Configuration types for the exploration run.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic setup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of customer records to synthesize.
pub const DEFAULT_ROWS: usize = 100;

/// Default first purchase date of the generated sequence.
pub const DEFAULT_START_DATE: &str = "2023-01-01";

/// Configuration for an exploration run.
///
/// Use [`ExplorationConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use retail_eda::ExplorationConfig;
///
/// let config = ExplorationConfig::builder()
///     .rows(100)
///     .seed(42)
///     .output_dir("outputs")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationConfig {
    /// Number of customer records to synthesize.
    /// Default: 100
    pub rows: usize,

    /// Optional RNG seed for reproducible runs.
    ///
    /// When `None`, the generator is seeded from entropy and output
    /// differs run to run.
    /// Default: None
    pub seed: Option<u64>,

    /// First date of the daily purchase-date sequence.
    /// Default: 2023-01-01
    pub start_date: NaiveDate,

    /// Output directory for charts and reports.
    /// Default: "outputs"
    pub output_dir: PathBuf,

    /// Whether to render charts.
    /// Default: true
    pub render_charts: bool,

    /// Whether to open rendered charts in the default browser.
    /// Requires `render_charts`.
    /// Default: false
    pub open_charts: bool,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            seed: None,
            start_date: default_start_date(),
            output_dir: PathBuf::from("outputs"),
            render_charts: true,
            open_charts: false,
        }
    }
}

fn default_start_date() -> NaiveDate {
    // The literal is a valid ISO date, parse cannot fail.
    NaiveDate::parse_from_str(DEFAULT_START_DATE, "%Y-%m-%d").unwrap_or_default()
}

impl ExplorationConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExplorationConfigBuilder {
        ExplorationConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.rows == 0 {
            return Err(ConfigValidationError::InvalidRows(self.rows));
        }

        if self.open_charts && !self.render_charts {
            return Err(ConfigValidationError::OpenWithoutCharts);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid row count: {0} (must be at least 1)")]
    InvalidRows(usize),

    #[error("Cannot open charts when chart rendering is disabled")]
    OpenWithoutCharts,

    #[error("Invalid start date '{0}' (expected YYYY-MM-DD)")]
    InvalidStartDate(String),
}

/// Builder for [`ExplorationConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ExplorationConfigBuilder {
    rows: Option<usize>,
    seed: Option<u64>,
    start_date: Option<NaiveDate>,
    start_date_error: Option<String>,
    output_dir: Option<PathBuf>,
    render_charts: Option<bool>,
    open_charts: Option<bool>,
}

impl ExplorationConfigBuilder {
    /// Set the number of records to synthesize.
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Set an explicit RNG seed for reproducible output.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the first purchase date.
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Set the first purchase date from a `YYYY-MM-DD` string.
    ///
    /// Parse failures are reported by [`build`](Self::build).
    pub fn start_date_str(mut self, date: &str) -> Self {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => self.start_date = Some(parsed),
            Err(_) => self.start_date_error = Some(date.to_string()),
        }
        self
    }

    /// Set the output directory for charts and reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Enable or disable chart rendering.
    pub fn render_charts(mut self, render: bool) -> Self {
        self.render_charts = Some(render);
        self
    }

    /// Enable or disable opening rendered charts in the browser.
    pub fn open_charts(mut self, open: bool) -> Self {
        self.open_charts = Some(open);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ExplorationConfig` or an error if validation
    /// fails.
    pub fn build(self) -> Result<ExplorationConfig, ConfigValidationError> {
        if let Some(bad_date) = self.start_date_error {
            return Err(ConfigValidationError::InvalidStartDate(bad_date));
        }

        let config = ExplorationConfig {
            rows: self.rows.unwrap_or(DEFAULT_ROWS),
            seed: self.seed,
            start_date: self.start_date.unwrap_or_else(default_start_date),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from("outputs")),
            render_charts: self.render_charts.unwrap_or(true),
            open_charts: self.open_charts.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}
