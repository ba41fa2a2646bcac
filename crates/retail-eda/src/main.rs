//! CLI entry point for the retail customer EDA run.

use anyhow::{Result, anyhow};
use clap::Parser;
use polars::prelude::DataFrame;
use retail_eda::{
    COL_CUSTOMER_RATING, COL_PRODUCT_CATEGORY, DatasetGenerator, ExplorationConfig,
    ExplorationReport, KEY_FINDINGS, MedianImputer, MissingCount, ReportWriter, charts,
    missing_value_counts, profiler,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Synthetic retail customer dataset exploration",
    long_about = "Synthesizes a toy retail customer dataset, cleans the rating column,\n\
                  prints summary statistics, and renders a fixed set of charts.\n\n\
                  EXAMPLES:\n  \
                  # Default run: 100 rows, charts under ./outputs/charts\n  \
                  retail-eda\n\n  \
                  # Reproducible run with a JSON report on disk\n  \
                  retail-eda --seed 42 --emit-report\n\n  \
                  # Machine-readable output only\n  \
                  retail-eda --seed 42 --json | jq .imputation"
)]
struct Args {
    /// Number of customer records to synthesize
    #[arg(long, default_value = "100")]
    rows: usize,

    /// RNG seed for reproducible output
    ///
    /// Without a seed the dataset differs run to run.
    #[arg(long)]
    seed: Option<u64>,

    /// First purchase date of the daily sequence (YYYY-MM-DD)
    #[arg(long, default_value = "2023-01-01")]
    start_date: String,

    /// Output directory for charts and reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Skip chart rendering entirely
    #[arg(long)]
    no_charts: bool,

    /// Open each rendered chart in the default browser
    #[arg(long)]
    open: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output the JSON report to stdout instead of the human-readable summary
    ///
    /// Disables all progress logs; only the JSON report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Write the JSON report to the output directory
    ///
    /// Saved as exploration_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let mut builder = ExplorationConfig::builder()
        .rows(args.rows)
        .start_date_str(&args.start_date)
        .output_dir(&args.output)
        .render_charts(!args.no_charts)
        .open_charts(args.open);

    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let config = builder
        .build()
        .map_err(|e| anyhow!("Invalid configuration: {e}"))?;

    run(&config, &args)
}

fn run(config: &ExplorationConfig, args: &Args) -> Result<()> {
    info!("Generating {} customer records...", config.rows);
    let mut df = DatasetGenerator::generate(config)?;

    let missing_before = missing_value_counts(&df);

    let mut steps = Vec::new();
    let imputation = MedianImputer::fill_with_median(&mut df, COL_CUSTOMER_RATING, &mut steps)?;
    let missing_after = missing_value_counts(&df);

    let describe_df = profiler::describe(&df)?;
    let matrix = profiler::correlation_matrix(&df)?;
    let categories = {
        let series = df
            .column(COL_PRODUCT_CATEGORY)?
            .as_materialized_series()
            .clone();
        profiler::category_counts(&series)?
    };

    let chart_files = if config.render_charts {
        charts::render_all(&df, &matrix, config)?
    } else {
        Vec::new()
    };

    let report = ExplorationReport::build(
        config,
        df.shape(),
        missing_before,
        missing_after,
        imputation,
        steps,
        categories,
        matrix,
        &chart_files,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let writer = ReportWriter::new(&config.output_dir);
        writer.write_json(&report, "exploration")?;
    }

    print_human_readable_summary(&report, &describe_df);

    Ok(())
}

/// Print the run summary to stdout.
///
/// This uses `println!` intentionally for user-facing CLI output; unlike
/// logging it should always be visible regardless of log level.
fn print_human_readable_summary(report: &ExplorationReport, describe_df: &DataFrame) {
    println!("Missing values before handling:");
    print_missing_counts(&report.missing_before);

    println!("\nSummary statistics:");
    println!("{}", describe_df);

    if !report.chart_files.is_empty() {
        println!("Charts:");
        for path in &report.chart_files {
            println!("  - {}", path);
        }
    }

    println!("\nKey Findings:");
    for (i, finding) in KEY_FINDINGS.iter().enumerate() {
        println!("{}. {}", i + 1, finding);
    }
}

fn print_missing_counts(counts: &[MissingCount]) {
    for entry in counts {
        println!("{:<20} {}", entry.column, entry.count);
    }
}
