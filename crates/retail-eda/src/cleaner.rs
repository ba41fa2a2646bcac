//! Missing-value reporting and median imputation.
//!
//! The rating column is the only one that can carry nulls; cleaning fills
//! them with the column median and records what was done.

use crate::error::{ExplorationError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Null count for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCount {
    pub column: String,
    pub count: usize,
}

/// Per-column missing-value counts, in table column order.
pub fn missing_value_counts(df: &DataFrame) -> Vec<MissingCount> {
    df.get_columns()
        .iter()
        .map(|col| MissingCount {
            column: col.name().to_string(),
            count: col.null_count(),
        })
        .collect()
}

/// Outcome of a median imputation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputationOutcome {
    /// Column that was filled.
    pub column: String,
    /// Median of the non-null values, used as the fill value.
    pub fill_value: f64,
    /// Number of rows that were filled.
    pub imputed_rows: usize,
}

/// Median imputation for the nullable rating column.
pub struct MedianImputer;

impl MedianImputer {
    /// Fill nulls in `col_name` with the column median.
    ///
    /// The column is rebuilt as `Float64` with every null replaced by the
    /// median of the non-null values. A human-readable step is pushed to
    /// `processing_steps`.
    ///
    /// Returns an error when the column does not exist or holds no
    /// non-null values to take a median from.
    pub fn fill_with_median(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<ImputationOutcome> {
        let series = df
            .column(col_name)
            .map_err(|_| ExplorationError::ColumnNotFound(col_name.to_string()))?
            .as_materialized_series()
            .clone();

        let median = series
            .median()
            .ok_or_else(|| ExplorationError::NoValidValues(col_name.to_string()))?;

        let mask = series.is_null();
        let mut result_vec = Vec::with_capacity(series.len());
        let mut imputed_rows = 0usize;

        for i in 0..series.len() {
            if mask.get(i).unwrap_or(false) {
                result_vec.push(Some(median));
                imputed_rows += 1;
            } else {
                let val = series.get(i)?;
                result_vec.push(Some(val.try_extract::<f64>()?));
            }
        }

        let filled = Series::new(col_name.into(), result_vec);
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled '{}' with median: {:.2} ({} rows)",
            col_name, median, imputed_rows
        ));
        info!(
            "Imputed {} missing values in '{}' with median {:.2}",
            imputed_rows, col_name, median
        );
        debug!("'{}' null count after fill: {}", col_name, df.column(col_name)?.null_count());

        Ok(ImputationOutcome {
            column: col_name.to_string(),
            fill_value: median,
            imputed_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_counts_per_column() {
        let df = df![
            "a" => [Some(1.0), None, Some(3.0)],
            "b" => ["x", "y", "z"],
        ]
        .unwrap();

        let counts = missing_value_counts(&df);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0], MissingCount { column: "a".to_string(), count: 1 });
        assert_eq!(counts[1], MissingCount { column: "b".to_string(), count: 0 });
    }

    #[test]
    fn test_fill_with_median_basic() {
        let mut df = df![
            "rating" => [Some(1.0), None, Some(3.0), None, Some(5.0)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let outcome = MedianImputer::fill_with_median(&mut df, "rating", &mut steps).unwrap();

        // Median of [1, 3, 5] = 3
        assert_eq!(outcome.fill_value, 3.0);
        assert_eq!(outcome.imputed_rows, 2);

        let rating = df.column("rating").unwrap();
        assert_eq!(rating.null_count(), 0);
        let filled_1 = rating.get(1).unwrap().try_extract::<f64>().unwrap();
        let filled_3 = rating.get(3).unwrap().try_extract::<f64>().unwrap();
        assert_eq!(filled_1, 3.0);
        assert_eq!(filled_3, 3.0);

        assert!(steps[0].contains("median"));
        assert!(steps[0].contains("3.00"));
    }

    #[test]
    fn test_fill_with_median_even_count_interpolates() {
        let mut df = df![
            "rating" => [Some(2.0), Some(5.0), None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let outcome = MedianImputer::fill_with_median(&mut df, "rating", &mut steps).unwrap();
        // Median of [2, 5] = 3.5
        assert_eq!(outcome.fill_value, 3.5);
    }

    #[test]
    fn test_fill_with_median_no_nulls() {
        let mut df = df![
            "rating" => [1.0, 2.0, 3.0],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let outcome = MedianImputer::fill_with_median(&mut df, "rating", &mut steps).unwrap();
        assert_eq!(outcome.imputed_rows, 0);

        let rating = df.column("rating").unwrap();
        assert_eq!(rating.get(0).unwrap().try_extract::<f64>().unwrap(), 1.0);
        assert_eq!(rating.get(2).unwrap().try_extract::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_fill_with_median_missing_column_errors() {
        let mut df = df![
            "other" => [1.0, 2.0],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = MedianImputer::fill_with_median(&mut df, "rating", &mut steps);
        assert!(matches!(
            result.unwrap_err(),
            ExplorationError::ColumnNotFound(_)
        ));
        assert!(steps.is_empty());
    }

    #[test]
    fn test_fill_with_median_all_nulls_errors() {
        let mut df = df![
            "rating" => [Option::<f64>::None, None, None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = MedianImputer::fill_with_median(&mut df, "rating", &mut steps);
        assert!(matches!(
            result.unwrap_err(),
            ExplorationError::NoValidValues(_)
        ));
    }
}
