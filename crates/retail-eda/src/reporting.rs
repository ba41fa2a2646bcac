//! Run report assembly and JSON emission.

use crate::cleaner::{ImputationOutcome, MissingCount};
use crate::config::ExplorationConfig;
use crate::error::Result;
use crate::profiler::{CategoryCount, CorrelationMatrix};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The four narrative findings printed at the end of every run.
///
/// They describe the generating distribution rather than the sampled
/// data, so they are fixed strings.
pub const KEY_FINDINGS: [&str; 4] = [
    "Sales revenue is distributed between $20 and $500 with a peak around the lower range.",
    "Most customers rate their purchases highly, with ratings concentrated around 4 and 5.",
    "Electronics and Clothing are the most purchased product categories.",
    "There is no strong correlation between age and sales revenue.",
];

/// Full record of one exploration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationReport {
    /// Timestamp when the report was generated.
    pub generated_at: String,
    /// Seed used for generation, if any.
    pub seed: Option<u64>,
    /// Rows in the generated table.
    pub rows: usize,
    /// Columns in the generated table.
    pub columns: usize,
    /// Per-column null counts before cleaning.
    pub missing_before: Vec<MissingCount>,
    /// Per-column null counts after cleaning.
    pub missing_after: Vec<MissingCount>,
    /// Details of the rating imputation.
    pub imputation: ImputationOutcome,
    /// Human-readable processing steps, in execution order.
    pub processing_steps: Vec<String>,
    /// Product category counts, descending.
    pub category_counts: Vec<CategoryCount>,
    /// Pearson correlation matrix over numeric columns.
    pub correlation: CorrelationMatrix,
    /// Paths of the rendered chart files.
    pub chart_files: Vec<String>,
    /// The fixed narrative findings.
    pub key_findings: Vec<String>,
}

impl ExplorationReport {
    /// Assemble the report from the run's artifacts.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        config: &ExplorationConfig,
        shape: (usize, usize),
        missing_before: Vec<MissingCount>,
        missing_after: Vec<MissingCount>,
        imputation: ImputationOutcome,
        processing_steps: Vec<String>,
        category_counts: Vec<CategoryCount>,
        correlation: CorrelationMatrix,
        chart_files: &[PathBuf],
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            seed: config.seed,
            rows: shape.0,
            columns: shape.1,
            missing_before,
            missing_after,
            imputation,
            processing_steps,
            category_counts,
            correlation,
            chart_files: chart_files
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            key_findings: KEY_FINDINGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Writes reports to the output directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write the report as pretty-printed JSON to
    /// `<output_dir>/<stem>_report.json` and return the path.
    pub fn write_json(&self, report: &ExplorationReport, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{stem}_report.json"));
        fs::write(&path, serde_json::to_string_pretty(report)?)?;
        info!("Report written to: {}", path.display());
        Ok(path)
    }

    /// The directory reports are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::CorrelationMatrix;

    fn sample_report() -> ExplorationReport {
        ExplorationReport {
            generated_at: "2023-01-01 00:00:00".to_string(),
            seed: Some(42),
            rows: 100,
            columns: 7,
            missing_before: vec![MissingCount {
                column: "Customer_Rating".to_string(),
                count: 17,
            }],
            missing_after: vec![MissingCount {
                column: "Customer_Rating".to_string(),
                count: 0,
            }],
            imputation: ImputationOutcome {
                column: "Customer_Rating".to_string(),
                fill_value: 3.0,
                imputed_rows: 17,
            },
            processing_steps: vec!["Filled 'Customer_Rating' with median: 3.00".to_string()],
            category_counts: vec![],
            correlation: CorrelationMatrix {
                columns: vec!["Age".to_string()],
                values: vec![vec![1.0]],
            },
            chart_files: vec![],
            key_findings: KEY_FINDINGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        let parsed: ExplorationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.rows, 100);
        assert_eq!(parsed.imputation.imputed_rows, 17);
        assert_eq!(parsed.key_findings.len(), 4);
    }

    #[test]
    fn test_write_json_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let path = writer.write_json(&sample_report(), "exploration").unwrap();

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Customer_Rating"));
        assert!(content.contains("key_findings"));
    }

    #[test]
    fn test_key_findings_are_the_original_four() {
        assert_eq!(KEY_FINDINGS.len(), 4);
        assert!(KEY_FINDINGS[0].contains("$20 and $500"));
        assert!(KEY_FINDINGS[3].contains("no strong correlation"));
    }
}
