//! Fit and check every cost category of an accumulated run.
//!
//! The result is a serializable `AnalysisSummary`: fitted models, reference
//! model evaluations, kernel statistics and run counts.

use super::category::CostCategory;
use super::evaluate::{evaluate, Evaluation};
use crate::aggregator::Accumulator;
use crate::model::{fit, FittedModel, LinearModel, Observation};
use crate::utils::config::{AnalysisConfig, SCHEMA_VERSION};
use chrono::Utc;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A regression attempt; exactly one of `model` and `error` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitOutcome {
    pub predictors: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<FittedModel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FitOutcome {
    fn from_fit(predictors: Vec<String>, observations: &[Observation]) -> Self {
        match fit(observations) {
            Ok(model) => Self {
                predictors,
                model: Some(model),
                error: None,
            },
            Err(e) => Self {
                predictors,
                model: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        self.model.is_none()
    }
}

/// Results for one cost category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: CostCategory,

    /// Model fitted on all predictors of the category
    pub fit: FitOutcome,

    /// Informational fits on predictor subsets
    pub variants: Vec<FitOutcome>,

    /// Previously accepted model
    pub reference: LinearModel,

    /// Reference model checked against the observations
    pub evaluation: Evaluation,
}

/// Average and maximum of a sample list, over finite values only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    pub count: usize,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
}

impl SampleStats {
    pub fn from_samples(samples: impl IntoIterator<Item = f64>) -> Self {
        let finite: Vec<f64> = samples.into_iter().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Self::default();
        }
        let sum: f64 = finite.iter().sum();
        Self {
            count: finite.len(),
            average: Some(sum / finite.len() as f64),
            maximum: finite.iter().copied().reduce(f64::max),
        }
    }
}

/// Kernel-wide tick statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KernelStats {
    /// Total call ticks over total call gas
    pub overall_tick_per_gas: Option<f64>,
    pub tick_per_gas: SampleStats,
    pub signature_verification: SampleStats,
    pub interpreter_init: SampleStats,
    pub interpreter_decode: SampleStats,
    pub transfer_overhead: SampleStats,
    pub kernel_run: SampleStats,
}

/// Counters of the run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunCounts {
    pub total_gas: f64,
    pub total_ticks: f64,
    pub transactions: u64,
    pub transfers: u64,
    pub creates: u64,
    pub calls: u64,
    pub kernel_runs: u64,
    pub first_runs: u64,
    /// Bench rows that are not first runs: reboots, finalize lines and
    /// per-benchmark total rows
    pub reboot_runs: u64,
    pub blocks: usize,
    pub unfinalized_blocks: usize,
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Schema version for compatibility checking
    pub version: String,

    pub categories: Vec<CategoryReport>,
    pub kernel: KernelStats,
    pub counts: RunCounts,

    /// Records skipped per missing field
    pub skipped: BTreeMap<String, u64>,

    /// Sum of reference model underestimates over all categories
    pub total_underestimates: usize,

    /// Categories whose main fit failed
    pub fit_failures: usize,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

impl AnalysisSummary {
    /// True iff no reference model underestimates and every fit succeeded
    pub fn is_success(&self) -> bool {
        self.total_underestimates == 0 && self.fit_failures == 0
    }

    pub fn category(&self, category: CostCategory) -> Option<&CategoryReport> {
        self.categories.iter().find(|r| r.category == category)
    }
}

/// Fit and evaluate one category
pub fn analyze_category(
    category: CostCategory,
    acc: &Accumulator,
    config: &AnalysisConfig,
) -> CategoryReport {
    let names = category.predictor_names();
    let observations = category.observations(acc);
    debug!("{}: {} observations", category, observations.len());

    let fit = FitOutcome::from_fit(names.iter().map(|n| n.to_string()).collect(), &observations);
    if let Some(e) = &fit.error {
        error!("{}: cannot fit model: {}", category, e);
    }

    let variants = category
        .variants()
        .iter()
        .map(|&index| {
            let projected: Vec<Observation> = observations
                .iter()
                .map(|o| Observation::new(vec![o.predictors[index]], o.observed))
                .collect();
            FitOutcome::from_fit(vec![names[index].to_string()], &projected)
        })
        .collect();

    let reference = category.reference_model(config).clone();
    let evaluation = evaluate(&observations, &reference);

    CategoryReport {
        category,
        fit,
        variants,
        reference,
        evaluation,
    }
}

/// Fit and evaluate all categories of a run
///
/// **Public** - main entry point for reporting, called once the whole batch
/// has been folded
pub fn analyze(acc: &Accumulator, config: &AnalysisConfig) -> AnalysisSummary {
    let categories: Vec<CategoryReport> = CostCategory::ALL
        .iter()
        .map(|&category| analyze_category(category, acc, config))
        .collect();

    for report in categories.iter().filter(|r| r.evaluation.has_underestimates()) {
        warn!(
            "{}: reference model underestimates {} of {} samples (max error {:.0})",
            report.category,
            report.evaluation.error_count,
            report.evaluation.samples,
            report.evaluation.max_error
        );
    }

    let total_underestimates = categories.iter().map(|r| r.evaluation.error_count).sum();
    let fit_failures = categories.iter().filter(|r| r.fit.is_failure()).count();

    info!(
        "Analysis complete: {} underestimates, {} failed fits",
        total_underestimates, fit_failures
    );

    AnalysisSummary {
        version: SCHEMA_VERSION.to_string(),
        categories,
        kernel: kernel_stats(acc),
        counts: run_counts(acc),
        skipped: acc.skipped.clone(),
        total_underestimates,
        fit_failures,
        generated_at: Utc::now().to_rfc3339(),
    }
}

fn kernel_stats(acc: &Accumulator) -> KernelStats {
    let overall = acc.total_ticks_tx / acc.total_gas;
    KernelStats {
        overall_tick_per_gas: overall.is_finite().then_some(overall),
        tick_per_gas: SampleStats::from_samples(acc.tick_per_gas.iter().copied()),
        signature_verification: SampleStats::from_samples(acc.signatures.iter().copied()),
        interpreter_init: SampleStats::from_samples(acc.interpreter_init.iter().copied()),
        interpreter_decode: SampleStats::from_samples(acc.interpreter_decode.iter().copied()),
        transfer_overhead: SampleStats::from_samples(acc.transfers.iter().map(|t| t.ticks)),
        kernel_run: SampleStats::from_samples(acc.kernel_runs.iter().copied()),
    }
}

fn run_counts(acc: &Accumulator) -> RunCounts {
    RunCounts {
        total_gas: acc.total_gas,
        total_ticks: acc.total_ticks_tx,
        transactions: acc.nb_transactions(),
        transfers: acc.nb_transfer,
        creates: acc.nb_create,
        calls: acc.nb_call,
        kernel_runs: acc.nb_kernel_run,
        first_runs: acc.nb_first_run,
        reboot_runs: acc.nb_reboot_run,
        blocks: acc.blocks.len(),
        unfinalized_blocks: acc.unfinalized_blocks(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stats_ignore_non_finite() {
        let stats = SampleStats::from_samples([10.0, f64::INFINITY, 30.0, f64::NAN]);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average, Some(20.0));
        assert_eq!(stats.maximum, Some(30.0));
    }

    #[test]
    fn test_empty_run_fails_every_fit() {
        let summary = analyze(&Accumulator::new(), &AnalysisConfig::default());

        assert_eq!(summary.categories.len(), 4);
        assert_eq!(summary.fit_failures, 4);
        assert_eq!(summary.total_underestimates, 0);
        assert!(!summary.is_success());
        assert_eq!(summary.kernel.overall_tick_per_gas, None);
    }
}
