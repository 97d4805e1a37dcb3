//! Tick cost models and least-squares fitting.
//!
//! Reference models come from configuration; fitted models come from the
//! samples of a run. Both predict through the `CostModel` trait.

pub mod cost_model;
pub mod regression;

// Re-export main types and functions
pub use cost_model::{CostModel, FittedModel, LinearModel, Observation};
pub use regression::fit;
