//! CLI entry point for the CSV cleaning pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use csv_cleaner::{
    CleanerConfig, CleanerConfigBuilder, CleaningReport, CleaningResult, NonNumericPolicy,
    Pipeline, TargetColumns, load_table, parse_column_list, save_table,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean a CSV file in five fixed stages",
    long_about = "Cleans a comma-separated file in five fixed stages:\n  \
                  1. drop rows with blank target columns\n  \
                  2. drop duplicate rows\n  \
                  3. trim and lowercase target columns\n  \
                  4. min-max normalize the numeric column\n  \
                  5. drop rows outside the IQR fences of the numeric column\n\n\
                  EXAMPLES:\n  \
                  # Clean in place\n  \
                  csv-cleaner -i data.csv -c name,city\n\n  \
                  # Write elsewhere, using 'price' as the numeric column\n  \
                  csv-cleaner -i data.csv -c name -o clean.csv --numeric-column price\n\n  \
                  # Preview without writing\n  \
                  csv-cleaner -i data.csv -c name --dry-run"
)]
struct Args {
    /// Path to the CSV file to clean
    #[arg(short, long)]
    input: PathBuf,

    /// Comma-separated list of target columns
    ///
    /// Rows blank in any of these are dropped; their text is trimmed and
    /// lowercased.
    #[arg(short, long)]
    columns: String,

    /// Where to write the cleaned file
    ///
    /// Defaults to the input path, which is overwritten.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Column to normalize and filter for outliers [default: numericColumn]
    #[arg(long)]
    numeric_column: Option<String>,

    /// Multiplier k for the outlier fences Q1 - k*IQR and Q3 + k*IQR [default: 1.5]
    #[arg(long)]
    iqr_multiplier: Option<f64>,

    /// Keep rows whose numeric cell is missing or not a number
    #[arg(long)]
    keep_non_numeric: bool,

    /// JSON file with cleaner settings
    ///
    /// Explicit flags take precedence over values in this file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run the pipeline and print the summary without writing the output file
    #[arg(long)]
    dry_run: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to this path
    #[arg(short = 'r', long)]
    emit_report: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and final result)
    #[arg(short, long)]
    quiet: bool,
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

    let config = build_config(&args)?;
    let targets = TargetColumns::new(parse_column_list(&args.columns))
        .context("--columns must name at least one column")?;

    info!("Loading table from: {}", args.input.display());
    let table = load_table(&args.input)?;

    let pipeline = build_pipeline(&args, config.clone())?;
    let result = pipeline.process(table, &targets);

    let output_path = args.output.clone().unwrap_or_else(|| args.input.clone());
    if args.dry_run {
        info!("Dry run: not writing {}", output_path.display());
    } else if let Err(e) = save_table(&result.table, &output_path) {
        error!("Failed to save cleaned table: {}", e);
        return Err(e.into());
    }

    let report = CleaningReport::new(
        args.input.display().to_string(),
        (!args.dry_run).then(|| output_path.display().to_string()),
        &targets,
        &config,
        &result.summary,
    );

    handle_output(&report, &result, &args)
}

/// Merge `--config` with explicit flags.
fn build_config(args: &Args) -> Result<CleanerConfig> {
    let base = match &args.config {
        Some(path) => CleanerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CleanerConfig::default(),
    };

    let mut builder = CleanerConfigBuilder::from_config(base);
    if let Some(column) = &args.numeric_column {
        builder = builder.numeric_column(column);
    }
    if let Some(k) = args.iqr_multiplier {
        builder = builder.iqr_multiplier(k);
    }
    if args.keep_non_numeric {
        builder = builder.non_numeric_policy(NonNumericPolicy::Keep);
    }

    Ok(builder.build()?)
}

fn build_pipeline(args: &Args, config: CleanerConfig) -> Result<Pipeline> {
    let mut builder = Pipeline::builder().config(config);

    if !args.quiet {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    Ok(builder.build()?)
}

/// Handle output based on CLI flags.
///
/// - Default: Print human-readable summary to stdout
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Also write the JSON report to a file
fn handle_output(report: &CleaningReport, result: &CleaningResult, args: &Args) -> Result<()> {
    if let Some(path) = &args.emit_report {
        report.write_to_file(path)?;
    }

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    print_human_readable_summary(report, result, args.emit_report.as_deref());
    Ok(())
}

/// Print a human-readable summary of the cleaning run.
fn print_human_readable_summary(
    report: &CleaningReport,
    result: &CleaningResult,
    report_path: Option<&Path>,
) {
    let summary = &result.summary;

    println!();
    println!("{}", "=".repeat(80));
    if report.output_file.is_some() {
        println!("CLEANING COMPLETE");
    } else {
        println!("DRY RUN - nothing was written");
    }
    println!("{}", "=".repeat(80));
    println!();

    println!("Input:  {} ({} rows)", report.input_file, summary.rows_before);
    match &report.output_file {
        Some(output) => println!(
            "Output: {} ({} rows x {} columns)",
            output,
            summary.rows_after,
            result.table.column_names().len()
        ),
        None => println!("Output: (dry run) {} rows", summary.rows_after),
    }
    println!("Target Columns: {}", report.target_columns.join(", "));
    println!("Numeric Column: {}", report.config.numeric_column);
    println!();

    println!("Cleaning Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} -> {} ({} removed)",
        summary.rows_before, summary.rows_after, summary.rows_removed
    );
    if let Some(range) = summary.numeric_range {
        println!("  Numeric Range: [{}, {}]", range.min, range.max);
    }
    if let Some(bounds) = summary.outlier_bounds {
        println!(
            "  Outlier Fences: [{}, {}] (k = {})",
            bounds.lower, bounds.upper, report.config.iqr_multiplier
        );
    }
    println!();

    println!("Stages:");
    for stage in &summary.stages {
        println!(
            "  {:<26} {:>8} -> {:<8} ({} removed)",
            stage.stage.display_name(),
            stage.rows_before,
            stage.rows_after,
            stage.rows_removed
        );
    }
    println!();

    if !summary.warnings.is_empty() {
        println!("Warnings:");
        for warning in &summary.warnings {
            println!("  ! {}", warning);
        }
        println!();
    }

    match report_path {
        Some(path) => println!("Report written to: {}", path.display()),
        None => println!("Use --emit-report <path> to save a JSON report"),
    }
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
}
