//! Benchmark record definition and CSV input reader.
//!
//! One record is one row of a benchmark result file. Rows are sparse: a
//! transaction row carries gas/signature/size columns, a kernel run row
//! carries decode/init/fetch columns, a block row carries nb_tx/finalize
//! columns. Every value that is absent, empty, non-numeric or NaN is read
//! as `None`.

use crate::utils::error::ParseError;
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Explicit transaction kind, when the producer of the file tags it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Transfer,
    Create,
    Call,
}

/// A single benchmark row
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(default)]
    pub benchmark_name: String,

    /// Receipt status string, e.g. "OK_true"
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub kind: Option<TransactionKind>,

    // Transaction rows
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub gas_cost: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub run_transaction_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub signature_verification_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub store_transaction_object_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub store_receipt_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub register_tx_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sputnik_runtime_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tx_size: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub receipt_size: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub estimated_ticks: Option<f64>,

    // Kernel run rows
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub interpreter_init_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub interpreter_decode_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub fetch_blueprint_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub kernel_run_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub unaccounted_ticks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub inbox_size: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub bip_store: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub bip_read: Option<f64>,

    // Block rows
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub nb_tx: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub block_finalize: Option<f64>,

    /// Correlates a block row with its finalize row
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub block_index: Option<u64>,
}

impl BenchmarkRecord {
    /// Status present and non-empty
    pub fn has_status(&self) -> bool {
        self.status.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Replace non-finite numbers and empty strings with `None`
    fn normalized(mut self) -> Self {
        for value in [
            &mut self.gas_cost,
            &mut self.run_transaction_ticks,
            &mut self.signature_verification_ticks,
            &mut self.store_transaction_object_ticks,
            &mut self.store_receipt_ticks,
            &mut self.register_tx_ticks,
            &mut self.sputnik_runtime_ticks,
            &mut self.tx_size,
            &mut self.receipt_size,
            &mut self.estimated_ticks,
            &mut self.interpreter_init_ticks,
            &mut self.interpreter_decode_ticks,
            &mut self.fetch_blueprint_ticks,
            &mut self.kernel_run_ticks,
            &mut self.unaccounted_ticks,
            &mut self.inbox_size,
            &mut self.bip_store,
            &mut self.bip_read,
            &mut self.nb_tx,
            &mut self.block_finalize,
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                *value = None;
            }
        }
        if !self.has_status() {
            self.status = None;
        }
        self
    }
}

/// Read benchmark records from a CSV file
///
/// **Public** - main entry point for input
///
/// # Errors
/// * `ParseError::IoError` - file cannot be opened
/// * `ParseError::CsvError` - malformed CSV structure
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<BenchmarkRecord>, ParseError> {
    let path = path.as_ref();
    info!("Reading benchmark records from: {}", path.display());

    let file = File::open(path)?;
    read_records_from_reader(file)
}

/// Read benchmark records from any CSV source, preserving row order
pub fn read_records_from_reader<R: Read>(reader: R) -> Result<Vec<BenchmarkRecord>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = rdr
        .deserialize::<BenchmarkRecord>()
        .map(|row| row.map(BenchmarkRecord::normalized))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Read {} records", records.len());
    Ok(records)
}
