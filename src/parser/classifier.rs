//! Record classification.
//!
//! Benchmark rows carry no category column: the category is inferred from
//! which fields are present. Transaction rows are split into transfers,
//! creates and calls; bench rows into first runs and reboot runs.

use super::record::{BenchmarkRecord, TransactionKind};
use crate::utils::config::AnalysisConfig;
use serde::Serialize;
use std::fmt;

/// Category of a benchmark record. Every record belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Value transfer without contract execution
    Transfer,
    /// Contract creation
    Create,
    /// Contract execution
    Call,
    /// Kernel run that ingested a new batch of input
    FirstRun,
    /// Any other bench row (reboots, finalize lines, totals)
    RebootRun,
}

impl Category {
    pub fn is_transaction(self) -> bool {
        matches!(self, Category::Transfer | Category::Create | Category::Call)
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Transfer => "transfer",
            Category::Create => "create",
            Category::Call => "call",
            Category::FirstRun => "bench/first-run",
            Category::RebootRun => "bench/reboot-run",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record describes a transaction iff it has gas, execution ticks,
/// signature ticks or a status.
pub fn is_transaction(record: &BenchmarkRecord) -> bool {
    record.gas_cost.is_some()
        || record.run_transaction_ticks.is_some()
        || record.signature_verification_ticks.is_some()
        || record.has_status()
}

/// Interpreter ticks are only reported once per kernel invocation
pub fn is_kernel_run(record: &BenchmarkRecord) -> bool {
    record.interpreter_decode_ticks.is_some() || record.interpreter_init_ticks.is_some()
}

pub fn is_first_run(record: &BenchmarkRecord) -> bool {
    record.fetch_blueprint_ticks.is_some() && record.nb_tx.is_some()
}

/// Classify a record
///
/// **Public** - main entry point for classification
///
/// An explicit `kind` tag takes precedence. Without it a transfer is
/// recognised by its gas being exactly the base gas, and a create by a
/// store-object tick count above the configured cutoff. The create
/// heuristic is approximate: large calls that store big receipts can cross
/// the cutoff too.
pub fn classify(record: &BenchmarkRecord, config: &AnalysisConfig) -> Category {
    if !is_transaction(record) {
        return if is_first_run(record) {
            Category::FirstRun
        } else {
            Category::RebootRun
        };
    }

    if let Some(kind) = record.kind {
        return match kind {
            TransactionKind::Transfer => Category::Transfer,
            TransactionKind::Create => Category::Create,
            TransactionKind::Call => Category::Call,
        };
    }

    if record.gas_cost == Some(config.base_gas) {
        Category::Transfer
    } else if record
        .store_transaction_object_ticks
        .is_some_and(|ticks| ticks > config.create_store_ticks_cutoff)
    {
        Category::Create
    } else {
        Category::Call
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_alone_makes_a_transaction() {
        let record = BenchmarkRecord {
            status: Some("OK_false".to_string()),
            ..Default::default()
        };
        assert!(is_transaction(&record));
        assert_eq!(classify(&record, &AnalysisConfig::default()), Category::Call);
    }

    #[test]
    fn test_cutoff_is_exclusive() {
        let record = BenchmarkRecord {
            gas_cost: Some(50_000.0),
            store_transaction_object_ticks: Some(600_000.0),
            ..Default::default()
        };
        assert_eq!(classify(&record, &AnalysisConfig::default()), Category::Call);
    }

    #[test]
    fn test_transfer_checked_before_create() {
        let record = BenchmarkRecord {
            gas_cost: Some(21_000.0),
            store_transaction_object_ticks: Some(900_000.0),
            ..Default::default()
        };
        assert_eq!(classify(&record, &AnalysisConfig::default()), Category::Transfer);
    }

    #[test]
    fn test_first_run_needs_nb_tx() {
        let record = BenchmarkRecord {
            fetch_blueprint_ticks: Some(200_000.0),
            ..Default::default()
        };
        assert_eq!(classify(&record, &AnalysisConfig::default()), Category::RebootRun);
    }
}
