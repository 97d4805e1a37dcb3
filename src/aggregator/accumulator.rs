//! Running totals and sample lists of one analysis run.
//!
//! Sample lists keep input order, which is also the row order of the CSV
//! dumps. The accumulator lives for a single batch and is never persisted.

use crate::utils::error::AggregateError;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Execution ticks of a value transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferSample {
    pub benchmark_name: String,
    pub tx_size: Option<f64>,
    pub ticks: f64,
}

/// Ticks spent fetching a new batch of input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchSample {
    pub benchmark_name: String,
    pub size: f64,
    pub nb_tx: f64,
    pub ticks: f64,
}

/// Ticks spent storing a transaction object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterSample {
    pub benchmark_name: String,
    pub tx_size: f64,
    pub ticks: f64,
}

/// Identity of an opened block
///
/// Explicit indices and positions never collide: a row without
/// `block_index` cannot clash with a row that has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKey {
    /// `block_index` column of the opening row
    Index(u64),
    /// Position among opened blocks, for rows without an index
    Position(usize),
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKey::Index(index) => write!(f, "index {}", index),
            BlockKey::Position(position) => write!(f, "#{}", position),
        }
    }
}

/// A block opened by a first-run row, finalized by a later row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSample {
    pub key: BlockKey,
    pub benchmark_name: String,
    pub nb_tx: f64,
    pub size: Option<f64>,
    pub finalize_ticks: Option<f64>,
}

/// Accumulated state of one analysis run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Accumulator {
    /// Gas of contract calls, base gas excluded
    pub total_gas: f64,

    /// Execution ticks of contract calls, dispatch overhead excluded
    pub total_ticks_tx: f64,

    pub nb_transfer: u64,
    pub nb_create: u64,
    pub nb_call: u64,
    pub nb_kernel_run: u64,
    pub nb_first_run: u64,
    pub nb_reboot_run: u64,

    pub tick_per_gas: Vec<f64>,
    pub transfers: Vec<TransferSample>,
    pub signatures: Vec<f64>,
    pub interpreter_init: Vec<f64>,
    pub interpreter_decode: Vec<f64>,
    pub kernel_runs: Vec<f64>,
    pub fetch: Vec<FetchSample>,
    pub tx_register: Vec<RegisterSample>,
    pub blocks: Vec<BlockSample>,

    /// Records skipped per missing field
    pub skipped: BTreeMap<String, u64>,

    #[serde(skip)]
    block_positions: HashMap<BlockKey, usize>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record whose `field` was required but absent
    pub fn note_missing(&mut self, field: &str) {
        *self.skipped.entry(field.to_string()).or_insert(0) += 1;
    }

    pub fn skipped_count(&self, field: &str) -> u64 {
        self.skipped.get(field).copied().unwrap_or(0)
    }

    pub fn nb_transactions(&self) -> u64 {
        self.nb_transfer + self.nb_create + self.nb_call
    }

    /// Open a block awaiting its finalize ticks
    ///
    /// The key is the explicit block index when the row has one, the
    /// block's position otherwise.
    ///
    /// # Errors
    /// * `AggregateError::OrderingViolation` - the block index was already
    ///   opened
    pub fn open_block(
        &mut self,
        key: Option<u64>,
        benchmark_name: &str,
        nb_tx: f64,
        size: Option<f64>,
    ) -> Result<(), AggregateError> {
        let key = match key {
            Some(index) => BlockKey::Index(index),
            None => BlockKey::Position(self.blocks.len()),
        };
        if self.block_positions.contains_key(&key) {
            return Err(AggregateError::OrderingViolation(format!(
                "block {} of {} opened twice",
                key, benchmark_name
            )));
        }

        self.block_positions.insert(key, self.blocks.len());
        self.blocks.push(BlockSample {
            key,
            benchmark_name: benchmark_name.to_string(),
            nb_tx,
            size,
            finalize_ticks: None,
        });
        Ok(())
    }

    /// Attach finalize ticks to a block
    ///
    /// With a key the block is looked up; without one the most recently
    /// opened block is patched.
    pub fn finalize_block(&mut self, key: Option<u64>, ticks: f64) -> Result<(), AggregateError> {
        let position = match key {
            Some(index) => *self
                .block_positions
                .get(&BlockKey::Index(index))
                .ok_or_else(|| {
                    AggregateError::OrderingViolation(format!(
                        "finalize line for unknown block index {}",
                        index
                    ))
                })?,
            None => self.blocks.len().checked_sub(1).ok_or_else(|| {
                AggregateError::OrderingViolation(
                    "finalize line with no preceding block".to_string(),
                )
            })?,
        };

        let block = &mut self.blocks[position];
        if let Some(previous) = block.finalize_ticks {
            return Err(AggregateError::OrderingViolation(format!(
                "block {} of {} already finalized ({} ticks)",
                block.key, block.benchmark_name, previous
            )));
        }
        block.finalize_ticks = Some(ticks);
        Ok(())
    }

    /// Blocks whose finalize line never arrived
    pub fn unfinalized_blocks(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.finalize_ticks.is_none())
            .count()
    }
}
