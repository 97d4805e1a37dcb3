//! Aggregation of benchmark records into per-category samples.
//!
//! This module folds classified records into:
//! - Running totals (call gas and ticks)
//! - Per-category counters
//! - Ordered sample lists used for fitting and CSV export

pub mod accumulator;
pub mod process;

// Re-export main types and functions
pub use accumulator::{
    Accumulator, BlockKey, BlockSample, FetchSample, RegisterSample, TransferSample,
};
pub use process::{process_record, process_records};
