//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, execute_sanity, validate_args, AnalyzeOutcome};
pub use models::AnalyzeArgs;
pub use utils::{display_config, display_version, validate_summary_file};
