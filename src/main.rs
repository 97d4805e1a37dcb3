//! Tick Model Analysis CLI
//!
//! Checks the kernel's tick cost models against benchmark results.
//! Fits linear models per cost category and reports underestimations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;

use tick_model_analysis::commands::{
    display_config, display_version, execute_analyze, execute_sanity, validate_args,
    validate_summary_file, AnalyzeArgs,
};

/// Tick Model Analysis - cost model checks for EVM kernel benchmarks
#[derive(Parser, Debug)]
#[command(name = "tick-analysis")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fit and check cost models on benchmark results
    Analyze {
        /// Benchmark result CSV files, processed in order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// TOML configuration overriding constants and reference models
        #[arg(short, long, env = "TICK_ANALYSIS_CONFIG")]
        config: Option<PathBuf>,

        /// Directory for the per-category CSV files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output path for the JSON summary (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Also report rows with missing columns
        #[arg(long)]
        sanity: bool,
    },

    /// Report rows with missing columns
    Sanity {
        /// Benchmark result CSV files
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,
    },

    /// Validate a summary JSON file
    Validate {
        /// Path to summary JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display the default configuration
    Config {
        /// Print the full TOML configuration
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            config,
            output_dir,
            json,
            sanity,
        } => {
            let args = AnalyzeArgs {
                inputs: input,
                config,
                output_dir,
                output_json: json,
                sanity,
            };

            // Validate args first
            validate_args(&args)?;

            let outcome = execute_analyze(&args)?;

            println!("{}", outcome.report);
            if let Some(sanity) = &outcome.sanity {
                if sanity.is_clean() {
                    info!("Sanity check: no problems spotted");
                } else {
                    println!("{}", sanity.summary());
                }
            }

            if !outcome.summary.is_success() {
                error!(
                    "{} model underestimations, {} failed fits",
                    outcome.summary.total_underestimates, outcome.summary.fit_failures
                );
                anyhow::bail!("cost model check failed");
            }
        }

        Commands::Sanity { input } => {
            let report = execute_sanity(&input)?;
            if report.is_clean() {
                info!("Sanity check: no problems spotted");
            } else {
                println!("{}", report.summary());
            }
        }

        Commands::Validate { file } => {
            validate_summary_file(file)?;
        }

        Commands::Config { show } => {
            display_config(show)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
