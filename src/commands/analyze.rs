//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads the configuration
//! 2. Reads benchmark records
//! 3. Classifies and accumulates them
//! 4. Fits and evaluates the cost models
//! 5. Writes CSV dumps and the optional JSON summary

use super::models::AnalyzeArgs;
use crate::aggregator::{process_records, Accumulator};
use crate::output::{write_all_samples, write_summary};
use crate::parser::{read_records, BenchmarkRecord, SanityReport};
use crate::report::{analyze, render_report, AnalysisSummary};
use crate::utils::config::{load_config, AnalysisConfig};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Result of a run: the summary plus the text that was printed
#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub summary: AnalysisSummary,
    pub report: String,
    pub csv_files: Vec<PathBuf>,
    pub sanity: Option<SanityReport>,
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Returns the summary even when models underestimate; mapping a failed
/// summary to an exit status is left to the caller.
///
/// # Errors
/// * Configuration or input read failures
/// * Ordering violations in the input
/// * File write errors
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<AnalyzeOutcome> {
    let start_time = Instant::now();

    info!("Step 1/5: Loading configuration...");
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    debug!("Configuration: {:?}", config);

    info!("Step 2/5: Reading {} benchmark files...", args.inputs.len());
    let records = read_all_records(&args.inputs)?;

    info!("Step 3/5: Accumulating {} records...", records.len());
    let mut acc = Accumulator::new();
    process_records(&records, &mut acc, &config).context("Corrupt benchmark input")?;
    for (field, count) in &acc.skipped {
        warn!("{} samples skipped: missing {}", count, field);
    }

    let sanity = args.sanity.then(|| {
        let mut report = SanityReport::new();
        records.iter().for_each(|r| report.check(r));
        report
    });

    info!("Step 4/5: Fitting cost models...");
    let summary = analyze(&acc, &config);
    let report = render_report(&summary);

    info!("Step 5/5: Writing output files...");
    let csv_files = write_all_samples(&acc, &config.output_dir)
        .context("Failed to write sample CSV files")?;

    if let Some(path) = &args.output_json {
        write_summary(&summary, path).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(AnalyzeOutcome {
        summary,
        report,
        csv_files,
        sanity,
    })
}

/// Execute the sanity command: report incomplete rows only
pub fn execute_sanity(inputs: &[PathBuf]) -> Result<SanityReport> {
    let records = read_all_records(inputs)?;
    let mut report = SanityReport::new();
    for record in &records {
        report.check(record);
    }
    info!("Checked {} records", records.len());
    Ok(report)
}

/// Read every input file, in argument order
fn read_all_records(inputs: &[PathBuf]) -> Result<Vec<BenchmarkRecord>> {
    let mut records = Vec::new();
    for path in inputs {
        let mut batch = read_records(path)
            .with_context(|| format!("Failed to read benchmark file {}", path.display()))?;
        debug!("{}: {} records", path.display(), batch.len());
        records.append(&mut batch);
    }
    Ok(records)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("At least one benchmark file is required");
    }

    for input in &args.inputs {
        if !input.is_file() {
            anyhow::bail!("Benchmark file not found: {}", input.display());
        }
    }

    if let Some(config) = &args.config {
        if !config.is_file() {
            anyhow::bail!("Configuration file not found: {}", config.display());
        }
    }

    if let Some(dir) = &args.output_dir {
        if dir.is_file() {
            anyhow::bail!("Output directory is a file: {}", dir.display());
        }
    }

    Ok(())
}
