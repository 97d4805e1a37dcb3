//! Benchmark input parsing and classification.
//!
//! This module handles:
//! - Reading benchmark CSV rows into sparse records
//! - Classifying records into categories
//! - Sanity checking rows for missing columns

pub mod classifier;
pub mod record;
pub mod sanity;

// Re-export main types
pub use classifier::{classify, is_first_run, is_kernel_run, is_transaction, Category};
pub use record::{read_records, read_records_from_reader, BenchmarkRecord, TransactionKind};
pub use sanity::{check_record, SanityIssue, SanityReport};
