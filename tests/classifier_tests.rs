use tick_model_analysis::parser::{classify, is_kernel_run, is_transaction, BenchmarkRecord, Category, TransactionKind};
use tick_model_analysis::utils::config::AnalysisConfig;

#[test]
fn test_bench_records_are_never_transactions() {
    let config = AnalysisConfig::default();
    let bench_rows = vec![
        BenchmarkRecord::default(),
        BenchmarkRecord {
            interpreter_init_ticks: Some(1.0),
            interpreter_decode_ticks: Some(2.0),
            kernel_run_ticks: Some(3.0),
            ..Default::default()
        },
        BenchmarkRecord {
            fetch_blueprint_ticks: Some(1.0),
            nb_tx: Some(2.0),
            inbox_size: Some(3.0),
            ..Default::default()
        },
        BenchmarkRecord {
            block_finalize: Some(1.0),
            unaccounted_ticks: Some(5.0),
            store_transaction_object_ticks: Some(700_000.0),
            ..Default::default()
        },
        BenchmarkRecord {
            status: Some(String::new()),
            ..Default::default()
        },
    ];

    for record in &bench_rows {
        assert!(!is_transaction(record));
        assert!(!classify(record, &config).is_transaction());
    }
}

#[test]
fn test_base_gas_is_transfer() {
    let config = AnalysisConfig::default();
    for ticks in [None, Some(1.0), Some(10_000_000.0)] {
        let record = BenchmarkRecord {
            gas_cost: Some(21_000.0),
            run_transaction_ticks: ticks,
            ..Default::default()
        };
        assert_eq!(classify(&record, &config), Category::Transfer);
    }
}

#[test]
fn test_create_above_cutoff() {
    let record = BenchmarkRecord {
        gas_cost: Some(100_000.0),
        store_transaction_object_ticks: Some(700_000.0),
        ..Default::default()
    };
    assert_eq!(classify(&record, &AnalysisConfig::default()), Category::Create);
}

#[test]
fn test_explicit_kind_overrides_heuristics() {
    let record = BenchmarkRecord {
        gas_cost: Some(100_000.0),
        store_transaction_object_ticks: Some(700_000.0),
        kind: Some(TransactionKind::Call),
        ..Default::default()
    };
    assert_eq!(classify(&record, &AnalysisConfig::default()), Category::Call);
}

#[test]
fn test_configured_constants_are_used() {
    let config = AnalysisConfig {
        base_gas: 25_000.0,
        ..Default::default()
    };
    let record = BenchmarkRecord {
        gas_cost: Some(21_000.0),
        ..Default::default()
    };
    assert_eq!(classify(&record, &config), Category::Call);
}

#[test]
fn test_first_and_reboot_runs() {
    let config = AnalysisConfig::default();
    let first = BenchmarkRecord {
        interpreter_decode_ticks: Some(1.0),
        fetch_blueprint_ticks: Some(1.0),
        nb_tx: Some(1.0),
        ..Default::default()
    };
    let reboot = BenchmarkRecord {
        interpreter_decode_ticks: Some(1.0),
        kernel_run_ticks: Some(1.0),
        ..Default::default()
    };

    assert_eq!(classify(&first, &config), Category::FirstRun);
    assert_eq!(classify(&reboot, &config), Category::RebootRun);
    assert!(is_kernel_run(&reboot));
    assert_eq!(Category::FirstRun.name(), "bench/first-run");
}
