//! Descriptive statistics over the customer table.
//!
//! Provides the describe table, per-column numeric summaries, descending
//! category counts, and a pairwise Pearson correlation matrix over the
//! numeric columns.

use crate::error::Result;
use crate::utils::{is_numeric_dtype, numeric_values_with_nulls};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Summary statistics table (count/null_count/mean/std/min/25%/50%/75%/max
/// per column), in the layout polars produces.
pub fn describe(df: &DataFrame) -> Result<DataFrame> {
    Ok(df.describe(None)?)
}

/// Numeric summary for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub null_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Compute a numeric summary for a series.
///
/// Returns `None` for empty or all-null input. The standard deviation
/// uses the n-1 denominator; quartiles use linear interpolation.
pub fn numeric_summary(series: &Series) -> Result<Option<NumericSummary>> {
    let casted = series.cast(&DataType::Float64)?;
    let values: Vec<f64> = casted.f64()?.into_iter().flatten().collect();
    if values.is_empty() {
        return Ok(None);
    }

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0)
    } else {
        0.0
    };

    Ok(Some(NumericSummary {
        name: series.name().to_string(),
        count: n,
        null_count: series.null_count(),
        mean,
        std_dev: variance.sqrt(),
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted[n - 1],
    }))
}

/// Linear-interpolated quantile over a sorted slice.
pub(crate) fn quantile_sorted(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return values[lower];
    }
    let weight = pos - lower as f64;
    values[lower] + (values[upper] - values[lower]) * weight
}

/// Count and share of one category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Value counts of a string column, sorted by descending count.
///
/// Ties break on the value itself so the ordering is stable.
pub fn category_counts(series: &Series) -> Result<Vec<CategoryCount>> {
    let casted = series.cast(&DataType::String)?;
    let values: Vec<&str> = casted.str()?.into_iter().flatten().collect();
    let total = values.len() as f64;

    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for value in &values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut entries: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
            percentage: if total > 0.0 {
                (count as f64 / total) * 100.0
            } else {
                0.0
            },
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

    Ok(entries)
}

/// Pairwise Pearson correlation matrix over numeric columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Numeric column names, in table order.
    pub columns: Vec<String>,
    /// Row-major coefficient matrix aligned with `columns`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Number of columns in the matrix.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient between columns `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }
}

/// Compute the Pearson correlation matrix over all numeric columns.
///
/// Each pair uses pairwise-complete observations. The diagonal is 1.0;
/// pairs with fewer than two complete observations or zero variance
/// yield 0.0.
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let numeric_columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| is_numeric_dtype(col.dtype()))
        .map(|col| col.name().to_string())
        .collect();

    let mut series_values: Vec<Vec<Option<f64>>> = Vec::with_capacity(numeric_columns.len());
    for name in &numeric_columns {
        let series = df.column(name)?.as_materialized_series().clone();
        series_values.push(numeric_values_with_nulls(&series)?);
    }

    let size = numeric_columns.len();
    let mut values = vec![vec![0.0; size]; size];

    for i in 0..size {
        values[i][i] = 1.0;
        for j in (i + 1)..size {
            let r = pearson_pairwise(&series_values[i], &series_values[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: numeric_columns,
        values,
    })
}

/// Pearson coefficient over pairwise-complete observations.
fn pearson_pairwise(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some((*x, *y)),
            _ => None,
        })
        .collect();

    let n = pairs.len() as f64;
    if pairs.len() < 2 {
        return 0.0;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    cov / denom
}
