//! Cost model fitting, evaluation and reporting.
//!
//! This module turns an accumulated run into:
//! - Fitted models per cost category
//! - Underestimate counts of the reference models
//! - A serializable summary and its text rendering

pub mod analysis;
pub mod category;
pub mod evaluate;
pub mod text;

// Re-export main types and functions
pub use analysis::{
    analyze, analyze_category, AnalysisSummary, CategoryReport, FitOutcome, KernelStats,
    RunCounts, SampleStats,
};
pub use category::CostCategory;
pub use evaluate::{evaluate, Evaluation};
pub use text::render_report;
