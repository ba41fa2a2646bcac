//! Retail Customer EDA
//!
//! A small exploratory data analysis tool built with Rust and Polars.
//!
//! # Overview
//!
//! This library provides the pieces of a one-shot exploration run:
//!
//! - **Synthesis**: a seeded (or entropy-seeded) synthetic customer table
//! - **Cleaning**: missing-value counts and median imputation of the
//!   rating column
//! - **Profiling**: describe table, numeric summaries, category counts,
//!   and a Pearson correlation matrix
//! - **Charts**: five plotly charts written as standalone HTML files
//! - **Reporting**: a serializable run report with the fixed findings
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use retail_eda::{
//!     DatasetGenerator, ExplorationConfig, MedianImputer, charts, profiler,
//! };
//!
//! let config = ExplorationConfig::builder().seed(42).build()?;
//! let mut df = DatasetGenerator::generate(&config)?;
//!
//! let mut steps = Vec::new();
//! MedianImputer::fill_with_median(&mut df, retail_eda::COL_CUSTOMER_RATING, &mut steps)?;
//!
//! println!("{}", profiler::describe(&df)?);
//! let matrix = profiler::correlation_matrix(&df)?;
//! charts::render_all(&df, &matrix, &config)?;
//! ```

pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod profiler;
pub mod reporting;
pub mod synth;
pub mod utils;

pub use cleaner::{ImputationOutcome, MedianImputer, MissingCount, missing_value_counts};
pub use config::{ConfigValidationError, ExplorationConfig, ExplorationConfigBuilder};
pub use error::{ExplorationError, Result};
pub use profiler::{CategoryCount, CorrelationMatrix, NumericSummary};
pub use reporting::{ExplorationReport, KEY_FINDINGS, ReportWriter};
pub use synth::{
    ALL_COLUMNS, COL_AGE, COL_CUSTOMER_ID, COL_CUSTOMER_RATING, COL_GENDER,
    COL_PRODUCT_CATEGORY, COL_PURCHASE_DATE, COL_SALES_REVENUE, DatasetGenerator, GENDERS,
    PRODUCT_CATEGORIES,
};

// The public surface must stay usable across threads.
static_assertions::assert_impl_all!(ExplorationConfig: Send, Sync);
static_assertions::assert_impl_all!(ExplorationReport: Send, Sync);
static_assertions::assert_impl_all!(ExplorationError: Send, Sync);
