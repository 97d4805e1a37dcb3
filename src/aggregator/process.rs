//! Fold classified records into the accumulator.
//!
//! Records must be processed once each, in input order: finalize lines
//! refer back to blocks opened by earlier rows. Replaying a record counts it
//! twice.

use super::accumulator::{Accumulator, FetchSample, RegisterSample, TransferSample};
use crate::parser::{classify, is_kernel_run, BenchmarkRecord, Category};
use crate::utils::config::AnalysisConfig;
use crate::utils::error::AggregateError;
use log::{debug, warn};

/// Classify a record and fold it into `acc`
///
/// **Public** - main entry point for aggregation
///
/// Missing fields never fail the batch: the affected sample is skipped and
/// counted in `acc.skipped`.
///
/// # Errors
/// * `AggregateError::OrderingViolation` - a finalize line has no block to
///   patch, or its block is unknown or already finalized
pub fn process_record(
    record: &BenchmarkRecord,
    acc: &mut Accumulator,
    config: &AnalysisConfig,
) -> Result<Category, AggregateError> {
    let category = classify(record, config);
    if category.is_transaction() {
        process_transaction_record(record, category, acc, config);
    } else {
        process_bench_record(record, category, acc)?;
    }
    Ok(category)
}

/// Fold a whole batch, stopping at the first ordering violation
pub fn process_records<'a>(
    records: impl IntoIterator<Item = &'a BenchmarkRecord>,
    acc: &mut Accumulator,
    config: &AnalysisConfig,
) -> Result<usize, AggregateError> {
    let mut count = 0;
    for record in records {
        process_record(record, acc, config)?;
        count += 1;
    }
    debug!("Processed {} records", count);
    Ok(count)
}

fn process_transaction_record(
    record: &BenchmarkRecord,
    category: Category,
    acc: &mut Accumulator,
    config: &AnalysisConfig,
) {
    match record.signature_verification_ticks {
        Some(ticks) => acc.signatures.push(ticks),
        None => acc.note_missing("signature_verification_ticks"),
    }

    if let (Some(tx_size), Some(ticks)) = (record.tx_size, record.store_transaction_object_ticks) {
        acc.tx_register.push(RegisterSample {
            benchmark_name: record.benchmark_name.clone(),
            tx_size,
            ticks,
        });
    }

    match category {
        Category::Transfer => process_transfer(record, acc),
        Category::Create => acc.nb_create += 1,
        _ => process_call(record, acc, config),
    }
}

fn process_transfer(record: &BenchmarkRecord, acc: &mut Accumulator) {
    acc.nb_transfer += 1;
    match record.run_transaction_ticks {
        Some(ticks) => acc.transfers.push(TransferSample {
            benchmark_name: record.benchmark_name.clone(),
            tx_size: record.tx_size,
            ticks,
        }),
        None => acc.note_missing("run_transaction_ticks"),
    }
}

fn process_call(record: &BenchmarkRecord, acc: &mut Accumulator, config: &AnalysisConfig) {
    acc.nb_call += 1;

    let (Some(gas_cost), Some(run_ticks)) = (record.gas_cost, record.run_transaction_ticks) else {
        if record.gas_cost.is_none() {
            acc.note_missing("gas_cost");
        }
        if record.run_transaction_ticks.is_none() {
            acc.note_missing("run_transaction_ticks");
        }
        return;
    };

    let gas = gas_cost - config.base_gas;
    let ticks = run_ticks - config.run_transaction_overhead;
    acc.total_gas += gas;
    acc.total_ticks_tx += ticks;
    // gas == 0 is not filtered out and yields an infinite ratio
    acc.tick_per_gas.push(ticks / gas);
}

fn process_bench_record(
    record: &BenchmarkRecord,
    category: Category,
    acc: &mut Accumulator,
) -> Result<(), AggregateError> {
    match category {
        Category::FirstRun => acc.nb_first_run += 1,
        _ => acc.nb_reboot_run += 1,
    }

    if is_kernel_run(record) {
        acc.nb_kernel_run += 1;
        if let Some(ticks) = record.interpreter_init_ticks {
            acc.interpreter_init.push(ticks);
        }
        if let Some(ticks) = record.interpreter_decode_ticks {
            acc.interpreter_decode.push(ticks);
        }
    }

    if let Some(ticks) = record.kernel_run_ticks {
        acc.kernel_runs.push(ticks);
    }

    if category == Category::FirstRun {
        if let (Some(ticks), Some(nb_tx)) = (record.fetch_blueprint_ticks, record.nb_tx) {
            match record.inbox_size {
                Some(size) => acc.fetch.push(FetchSample {
                    benchmark_name: record.benchmark_name.clone(),
                    size,
                    nb_tx,
                    ticks,
                }),
                None => acc.note_missing("inbox_size"),
            }
        }
    }

    if let Some(nb_tx) = record.nb_tx {
        acc.open_block(record.block_index, &record.benchmark_name, nb_tx, record.inbox_size)?;
    }

    if let Some(ticks) = record.block_finalize {
        acc.finalize_block(record.block_index, ticks).map_err(|e| {
            warn!("{}: {}", record.benchmark_name, e);
            e
        })?;
    }

    Ok(())
}
