use anyhow::Result;
use std::path::PathBuf;
use crate::output::read_summary;
use crate::utils::config::{AnalysisConfig, SCHEMA_VERSION};

/// Validate a summary JSON file
pub fn validate_summary_file(file_path: PathBuf) -> Result<()> {
    println!("Validating summary: {}", file_path.display());

    let summary = read_summary(&file_path)?;

    println!("✓ Valid summary JSON");
    println!("  Version: {}", summary.version);
    println!("  Generated: {}", summary.generated_at);
    println!("  Categories: {}", summary.categories.len());
    println!("  Underestimates: {}", summary.total_underestimates);
    println!("  Failed fits: {}", summary.fit_failures);

    Ok(())
}

/// Display the default configuration
pub fn display_config(show_details: bool) -> Result<()> {
    let config = AnalysisConfig::default();

    if show_details {
        println!("{}", config.to_toml()?);
    } else {
        println!("Base gas: {}", config.base_gas);
        println!("Run transaction overhead: {}", config.run_transaction_overhead);
        println!("Create cutoff: {}", config.create_store_ticks_cutoff);
        println!();
        println!("Use --show for the full TOML configuration");
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Tick Model Analysis v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Cost model checks for EVM kernel benchmark results.");
}
