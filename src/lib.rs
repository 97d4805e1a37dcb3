//! Tick Model Analysis
//!
//! Classification, cost-model fitting and underestimation reports for
//! EVM kernel benchmark results.
//!
//! This crate provides the core implementation for the
//! `tick-analysis` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! tick-analysis analyze --input benchmark_result.csv --json summary.json
//! ```
//!
//! The pipeline is a single ordered pass: records are classified and
//! folded into an accumulator, then every cost category is fitted and its
//! reference model checked for underestimates.

pub mod aggregator;
pub mod commands;
pub mod model;
pub mod output;
pub mod parser;
pub mod report;
pub mod utils;
