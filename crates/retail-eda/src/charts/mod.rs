//! Chart builders for the exploration run.
//!
//! Each builder returns a [`plotly::Plot`]; [`render_all`] writes the
//! full chart set as standalone HTML files under the output directory
//! and optionally opens them in the default browser.

mod kde;

pub use kde::{KdeCurve, gaussian_kde};

use crate::config::ExplorationConfig;
use crate::error::{ExplorationError, Result};
use crate::profiler::{CorrelationMatrix, category_counts};
use crate::synth::{
    COL_AGE, COL_CUSTOMER_RATING, COL_GENDER, COL_PRODUCT_CATEGORY, COL_SALES_REVENUE,
};
use crate::utils::numeric_values;
use plotly::color::NamedColor;
use plotly::common::{ColorScale, ColorScalePalette, Line, Marker, Mode, Title};
use plotly::traces::histogram::HistNorm;
use plotly::layout::{Annotation, Axis, Layout};
use plotly::{Bar, BoxPlot, HeatMap, Histogram, Plot, Scatter};
use polars::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

const KDE_GRID_SIZE: usize = 256;

fn column_series(df: &DataFrame, name: &str) -> Result<Series> {
    Ok(df
        .column(name)
        .map_err(|_| ExplorationError::ColumnNotFound(name.to_string()))?
        .as_materialized_series()
        .clone())
}

/// Histogram of `Sales_Revenue` with a Gaussian KDE overlay.
pub fn sales_revenue_histogram(df: &DataFrame) -> Result<Plot> {
    let values = numeric_values(&column_series(df, COL_SALES_REVENUE)?)?;
    if values.is_empty() {
        return Err(ExplorationError::NoValidValues(COL_SALES_REVENUE.to_string()));
    }

    let mut plot = Plot::new();
    plot.add_trace(
        Histogram::new(values.clone())
            .name(COL_SALES_REVENUE)
            .hist_norm(HistNorm::ProbabilityDensity)
            .marker(Marker::new().color(NamedColor::SkyBlue)),
    );

    if let Some(curve) = gaussian_kde(&values, KDE_GRID_SIZE) {
        plot.add_trace(
            Scatter::new(curve.x, curve.y)
                .mode(Mode::Lines)
                .name("density")
                .line(Line::new().color(NamedColor::SteelBlue)),
        );
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Sales Revenue Distribution"))
            .x_axis(Axis::new().title(Title::with_text(COL_SALES_REVENUE)))
            .y_axis(Axis::new().title(Title::with_text("Density"))),
    );
    Ok(plot)
}

/// Boxplot of the cleaned `Customer_Rating` column.
pub fn customer_rating_boxplot(df: &DataFrame) -> Result<Plot> {
    let values = numeric_values(&column_series(df, COL_CUSTOMER_RATING)?)?;
    if values.is_empty() {
        return Err(ExplorationError::NoValidValues(COL_CUSTOMER_RATING.to_string()));
    }

    let mut plot = Plot::new();
    plot.add_trace(
        BoxPlot::new(values)
            .name(COL_CUSTOMER_RATING)
            .marker(Marker::new().color(NamedColor::LightGreen)),
    );
    plot.set_layout(Layout::new().title(Title::with_text("Customer Ratings")));
    Ok(plot)
}

/// Bar chart of `Product_Category` counts, ordered by descending
/// frequency with rotated tick labels.
pub fn product_category_countplot(df: &DataFrame) -> Result<Plot> {
    let counts = category_counts(&column_series(df, COL_PRODUCT_CATEGORY)?)?;
    if counts.is_empty() {
        return Err(ExplorationError::NoValidValues(COL_PRODUCT_CATEGORY.to_string()));
    }

    let labels: Vec<String> = counts.iter().map(|c| c.value.clone()).collect();
    let heights: Vec<usize> = counts.iter().map(|c| c.count).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Bar::new(labels, heights)
            .name(COL_PRODUCT_CATEGORY)
            .marker(Marker::new().color(NamedColor::Thistle)),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Product Category Distribution"))
            .x_axis(Axis::new().tick_angle(45.0))
            .y_axis(Axis::new().title(Title::with_text("Count"))),
    );
    Ok(plot)
}

/// Heatmap of the correlation matrix with annotated coefficients.
pub fn correlation_heatmap(matrix: &CorrelationMatrix) -> Result<Plot> {
    if matrix.is_empty() {
        return Err(ExplorationError::ChartRender {
            chart: "correlation_heatmap".to_string(),
            reason: "no numeric columns to correlate".to_string(),
        });
    }

    let mut annotations = Vec::with_capacity(matrix.len() * matrix.len());
    for (i, row_name) in matrix.columns.iter().enumerate() {
        for (j, col_name) in matrix.columns.iter().enumerate() {
            let value = matrix.get(i, j).unwrap_or(0.0);
            annotations.push(
                Annotation::new()
                    .x(col_name.clone())
                    .y(row_name.clone())
                    .text(format!("{:.2}", value))
                    .show_arrow(false),
            );
        }
    }

    let mut plot = Plot::new();
    plot.add_trace(
        HeatMap::new(
            matrix.columns.clone(),
            matrix.columns.clone(),
            matrix.values.clone(),
        )
        .color_scale(ColorScale::Palette(ColorScalePalette::RdBu)),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Correlation Matrix"))
            .annotations(annotations),
    );
    Ok(plot)
}

/// Scatter plot of `Age` vs `Sales_Revenue`, one trace per gender.
pub fn age_vs_revenue_scatter(df: &DataFrame) -> Result<Plot> {
    let ages = numeric_values(&column_series(df, COL_AGE)?)?;
    let revenue = numeric_values(&column_series(df, COL_SALES_REVENUE)?)?;
    let genders_series = column_series(df, COL_GENDER)?;
    let genders: Vec<String> = genders_series
        .str()?
        .into_iter()
        .map(|g| g.unwrap_or("").to_string())
        .collect();

    if ages.len() != revenue.len() || ages.len() != genders.len() {
        return Err(ExplorationError::ChartRender {
            chart: "age_vs_revenue_scatter".to_string(),
            reason: "column lengths differ".to_string(),
        });
    }

    let mut distinct: Vec<String> = genders.clone();
    distinct.sort();
    distinct.dedup();

    let palette = [NamedColor::SteelBlue, NamedColor::DarkOrange, NamedColor::SeaGreen];

    let mut plot = Plot::new();
    for (idx, gender) in distinct.iter().enumerate() {
        let (xs, ys): (Vec<f64>, Vec<f64>) = genders
            .iter()
            .zip(ages.iter().zip(revenue.iter()))
            .filter(|(g, _)| *g == gender)
            .map(|(_, (a, r))| (*a, *r))
            .unzip();

        plot.add_trace(
            Scatter::new(xs, ys)
                .mode(Mode::Markers)
                .name(gender)
                .marker(Marker::new().color(palette[idx % palette.len()])),
        );
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Age vs Sales Revenue by Gender"))
            .x_axis(Axis::new().title(Title::with_text(COL_AGE)))
            .y_axis(Axis::new().title(Title::with_text(COL_SALES_REVENUE))),
    );
    Ok(plot)
}

/// Render the full chart set as HTML files under `<output>/charts`.
///
/// Returns the written paths in render order. With `open_charts` set,
/// each chart is also opened in the default browser.
pub fn render_all(
    df: &DataFrame,
    matrix: &CorrelationMatrix,
    config: &ExplorationConfig,
) -> Result<Vec<PathBuf>> {
    let charts_dir = config.output_dir.join("charts");
    std::fs::create_dir_all(&charts_dir)?;

    let charts: [(&str, Plot); 5] = [
        ("sales_revenue_distribution", sales_revenue_histogram(df)?),
        ("customer_ratings", customer_rating_boxplot(df)?),
        ("product_category_distribution", product_category_countplot(df)?),
        ("correlation_matrix", correlation_heatmap(matrix)?),
        ("age_vs_sales_revenue", age_vs_revenue_scatter(df)?),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (name, plot) in charts {
        let path = charts_dir.join(format!("{name}.html"));
        if config.open_charts {
            plot.show_html(&path);
        } else {
            plot.write_html(&path);
        }
        debug!("Wrote chart '{}' to {}", name, path.display());
        written.push(path);
    }

    info!("Rendered {} charts to {}", written.len(), charts_dir.display());
    Ok(written)
}
