use tick_model_analysis::aggregator::{process_record, process_records, Accumulator};
use tick_model_analysis::parser::{BenchmarkRecord, Category, TransactionKind};
use tick_model_analysis::utils::config::AnalysisConfig;

fn tx(name: &str, gas: f64, ticks: f64) -> BenchmarkRecord {
    BenchmarkRecord {
        benchmark_name: name.to_string(),
        gas_cost: Some(gas),
        run_transaction_ticks: Some(ticks),
        ..Default::default()
    }
}

#[test]
fn test_transfer_then_call() {
    let config = AnalysisConfig::default();
    let mut acc = Accumulator::new();

    let first = process_record(&tx("t1", 21_000.0, 560_000.0), &mut acc, &config).unwrap();
    let second = process_record(&tx("t2", 42_000.0, 900_000.0), &mut acc, &config).unwrap();

    assert_eq!(first, Category::Transfer);
    assert_eq!(second, Category::Call);

    assert_eq!(acc.nb_transfer, 1);
    assert_eq!(acc.transfers.len(), 1);
    assert_eq!(acc.transfers[0].ticks, 560_000.0);

    assert_eq!(acc.nb_call, 1);
    assert_eq!(acc.total_gas, 21_000.0);
    assert_eq!(acc.total_ticks_tx, 340_000.0);
    assert_eq!(acc.tick_per_gas.len(), 1);
    assert!((acc.tick_per_gas[0] - 16.19).abs() < 0.01);
}

#[test]
fn test_create_only_counts() {
    let config = AnalysisConfig::default();
    let mut acc = Accumulator::new();
    let record = BenchmarkRecord {
        gas_cost: Some(120_000.0),
        run_transaction_ticks: Some(5_000_000.0),
        store_transaction_object_ticks: Some(700_000.0),
        ..Default::default()
    };

    let category = process_record(&record, &mut acc, &config).unwrap();

    assert_eq!(category, Category::Create);
    assert_eq!(acc.nb_create, 1);
    assert!(acc.transfers.is_empty());
    assert!(acc.tick_per_gas.is_empty());
    assert_eq!(acc.total_gas, 0.0);
    assert_eq!(acc.total_ticks_tx, 0.0);
}

#[test]
fn test_replay_double_counts() {
    let config = AnalysisConfig::default();
    let records = vec![
        tx("t1", 21_000.0, 560_000.0),
        tx("t2", 42_000.0, 900_000.0),
    ];

    let mut once = Accumulator::new();
    process_records(&records, &mut once, &config).unwrap();

    let mut twice = Accumulator::new();
    process_records(&records, &mut twice, &config).unwrap();
    process_records(&records, &mut twice, &config).unwrap();

    assert_eq!(twice.total_gas, 2.0 * once.total_gas);
    assert_eq!(twice.total_ticks_tx, 2.0 * once.total_ticks_tx);
    assert_eq!(twice.nb_transfer, 2 * once.nb_transfer);
    assert_eq!(twice.nb_call, 2 * once.nb_call);
    assert_eq!(twice.tick_per_gas.len(), 2 * once.tick_per_gas.len());
    assert_eq!(twice.transfers.len(), 2 * once.transfers.len());
}

#[test]
fn test_call_at_base_gas_divides_by_zero() {
    let config = AnalysisConfig::default();
    let mut acc = Accumulator::new();
    let record = BenchmarkRecord {
        kind: Some(TransactionKind::Call),
        ..tx("t", 21_000.0, 900_000.0)
    };

    process_record(&record, &mut acc, &config).unwrap();

    assert_eq!(acc.nb_call, 1);
    assert_eq!(acc.tick_per_gas.len(), 1);
    assert!(acc.tick_per_gas[0].is_infinite());
}

#[test]
fn test_missing_signature_is_counted_not_fatal() {
    let config = AnalysisConfig::default();
    let mut acc = Accumulator::new();

    process_record(&tx("t1", 21_000.0, 560_000.0), &mut acc, &config).unwrap();

    assert!(acc.signatures.is_empty());
    assert_eq!(acc.skipped_count("signature_verification_ticks"), 1);
}

#[test]
fn test_register_sample_needs_size_and_store_ticks() {
    let config = AnalysisConfig::default();
    let mut acc = Accumulator::new();
    let with_size = BenchmarkRecord {
        tx_size: Some(110.0),
        store_transaction_object_ticks: Some(300_000.0),
        ..tx("t1", 21_000.0, 560_000.0)
    };
    let without_size = BenchmarkRecord {
        store_transaction_object_ticks: Some(300_000.0),
        ..tx("t2", 21_000.0, 560_000.0)
    };

    process_records([&with_size, &without_size], &mut acc, &config).unwrap();

    assert_eq!(acc.tx_register.len(), 1);
    assert_eq!(acc.tx_register[0].tx_size, 110.0);
    assert_eq!(acc.transfers[0].tx_size, Some(110.0));
    assert_eq!(acc.transfers[1].tx_size, None);
}

#[test]
fn test_keyed_finalize_lines_out_of_order() {
    let config = AnalysisConfig::default();
    let mut acc = Accumulator::new();
    let block = |index: u64, nb_tx: f64| BenchmarkRecord {
        benchmark_name: "b(all)".to_string(),
        fetch_blueprint_ticks: Some(300_000.0),
        inbox_size: Some(100.0 * nb_tx),
        nb_tx: Some(nb_tx),
        block_index: Some(index),
        ..Default::default()
    };
    let finalize = |index: u64, ticks: f64| BenchmarkRecord {
        benchmark_name: "b(all)".to_string(),
        block_finalize: Some(ticks),
        block_index: Some(index),
        ..Default::default()
    };

    let records = vec![block(0, 1.0), block(1, 4.0), finalize(1, 1_600_000.0), finalize(0, 800_000.0)];
    process_records(&records, &mut acc, &config).unwrap();

    assert_eq!(acc.nb_first_run, 2);
    assert_eq!(acc.fetch.len(), 2);
    assert_eq!(acc.blocks[0].finalize_ticks, Some(800_000.0));
    assert_eq!(acc.blocks[1].finalize_ticks, Some(1_600_000.0));
    assert_eq!(acc.unfinalized_blocks(), 0);
}

#[test]
fn test_first_run_without_inbox_size_skips_fetch_sample() {
    let config = AnalysisConfig::default();
    let mut acc = Accumulator::new();
    let record = BenchmarkRecord {
        fetch_blueprint_ticks: Some(300_000.0),
        nb_tx: Some(2.0),
        ..Default::default()
    };

    process_record(&record, &mut acc, &config).unwrap();

    assert!(acc.fetch.is_empty());
    assert_eq!(acc.blocks.len(), 1);
    assert_eq!(acc.skipped_count("inbox_size"), 1);
}

#[test]
fn test_unkeyed_block_after_keyed_block() {
    let config = AnalysisConfig::default();
    let mut acc = Accumulator::new();
    let first_run = |index: Option<u64>| BenchmarkRecord {
        benchmark_name: "b(all)".to_string(),
        fetch_blueprint_ticks: Some(300_000.0),
        inbox_size: Some(100.0),
        nb_tx: Some(1.0),
        block_index: index,
        ..Default::default()
    };
    let finalize = |index: Option<u64>, ticks: f64| BenchmarkRecord {
        benchmark_name: "b(all)".to_string(),
        block_finalize: Some(ticks),
        block_index: index,
        ..Default::default()
    };

    let records = vec![
        first_run(Some(1)),
        first_run(None),
        finalize(None, 900_000.0),
        finalize(Some(1), 800_000.0),
    ];
    process_records(&records, &mut acc, &config).unwrap();

    assert_eq!(acc.blocks.len(), 2);
    assert_eq!(acc.blocks[0].finalize_ticks, Some(800_000.0));
    assert_eq!(acc.blocks[1].finalize_ticks, Some(900_000.0));
}

#[test]
fn test_init_or_decode_counts_a_kernel_run() {
    let config = AnalysisConfig::default();
    let mut acc = Accumulator::new();
    let init_only = BenchmarkRecord {
        interpreter_init_ticks: Some(1_000.0),
        ..Default::default()
    };
    let decode_only = BenchmarkRecord {
        interpreter_decode_ticks: Some(2_000.0),
        ..Default::default()
    };

    process_records([&init_only, &decode_only], &mut acc, &config).unwrap();

    assert_eq!(acc.nb_kernel_run, 2);
    assert_eq!(acc.interpreter_init, vec![1_000.0]);
    assert_eq!(acc.interpreter_decode, vec![2_000.0]);
}
