//! Sanity checks on benchmark rows.
//!
//! Reports rows that lack the columns their kind of row is expected to
//! carry. Problems are collected, never fatal.

use super::classifier::is_transaction;
use super::record::BenchmarkRecord;
use serde::Serialize;

/// Problems found on a single row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanityIssue {
    pub name: String,
    /// "transaction", "benchmark", "first run" or "reboot run"
    pub kind: &'static str,
    pub errors: Vec<String>,
}

/// All problems found over a batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct SanityReport {
    pub issues: Vec<SanityIssue>,
}

impl SanityReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, record: &BenchmarkRecord) {
        if let Some(issue) = check_record(record) {
            self.issues.push(issue);
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Sanity check: {} problems spotted\n", self.issues.len()));
        for issue in &self.issues {
            out.push_str(&format!(
                "{}: {} record -> {}\n",
                issue.name,
                issue.kind,
                issue.errors.join(", ")
            ));
        }
        out
    }
}

/// Check one row
///
/// **Public** - returns `None` when the row is complete
pub fn check_record(record: &BenchmarkRecord) -> Option<SanityIssue> {
    let mut errors = Vec::new();
    let kind = if is_transaction(record) {
        check_transaction_record(record, &mut errors)
    } else if record.interpreter_init_ticks.is_none() {
        check_benchmark_record(record, &mut errors)
    } else {
        check_run_record(record, &mut errors)
    };

    if errors.is_empty() {
        None
    } else {
        Some(SanityIssue {
            name: record.benchmark_name.clone(),
            kind,
            errors,
        })
    }
}

fn require(value: Option<f64>, message: &str, errors: &mut Vec<String>) {
    if value.is_none() {
        errors.push(message.to_string());
    }
}

fn check_benchmark_record(record: &BenchmarkRecord, errors: &mut Vec<String>) -> &'static str {
    require(record.unaccounted_ticks, "missing unaccounted ticks", errors);
    require(record.block_finalize, "missing block finalization ticks", errors);
    "benchmark"
}

fn check_run_record(record: &BenchmarkRecord, errors: &mut Vec<String>) -> &'static str {
    require(record.interpreter_init_ticks, "missing init ticks", errors);
    require(record.interpreter_decode_ticks, "missing decode ticks", errors);
    require(record.kernel_run_ticks, "missing kernel run ticks", errors);
    require(record.estimated_ticks, "missing estimated ticks", errors);

    if record.fetch_blueprint_ticks.is_some() {
        require(record.inbox_size, "missing inbox size", errors);
        require(record.nb_tx, "missing number of tx", errors);
        require(record.bip_store, "missing bip store ticks", errors);
        "first run"
    } else {
        require(record.bip_read, "missing bip read ticks", errors);
        "reboot run"
    }
}

fn check_transaction_record(record: &BenchmarkRecord, errors: &mut Vec<String>) -> &'static str {
    if record.benchmark_name.is_empty() {
        errors.push("missing benchmark name".to_string());
    }
    require(
        record.signature_verification_ticks,
        "missing signature verification ticks",
        errors,
    );
    require(record.estimated_ticks, "missing estimated ticks", errors);

    let status = record.status.as_deref().unwrap_or_default();
    if status.is_empty() {
        errors.push("missing status".to_string());
    } else if status.contains("OK") {
        require(record.store_transaction_object_ticks, "missing tx storing ticks", errors);
        require(record.store_receipt_ticks, "missing receipt storing ticks", errors);
        require(record.register_tx_ticks, "missing register ticks", errors);
        require(record.gas_cost, "missing gas", errors);
        require(record.run_transaction_ticks, "missing execution ticks", errors);
        require(record.sputnik_runtime_ticks, "missing sputnik ticks", errors);
        require(record.tx_size, "missing tx size", errors);
        require(record.receipt_size, "missing receipt size", errors);
        if !status.contains("true") {
            errors.push(status.to_string());
        }
    } else {
        errors.push(status.to_string());
    }
    "transaction"
}
