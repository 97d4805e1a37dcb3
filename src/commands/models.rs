use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Benchmark result files, processed in order
    pub inputs: Vec<PathBuf>,

    /// TOML file overriding constants and reference models
    pub config: Option<PathBuf>,

    /// Directory for the CSV dumps (overrides the configuration)
    pub output_dir: Option<PathBuf>,

    /// Output path for the JSON summary (optional)
    pub output_json: Option<PathBuf>,

    /// Also print the sanity check report
    pub sanity: bool,
}
