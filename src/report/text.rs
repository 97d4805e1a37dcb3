//! Human-readable rendering of an analysis summary.

use super::analysis::{AnalysisSummary, CategoryReport, FitOutcome, SampleStats};

const SEPARATOR: &str = "-------------------------------------------------------";

/// Render the full text report
///
/// **Public** - printed by the analyze command
pub fn render_report(summary: &AnalysisSummary) -> String {
    let mut out = String::new();

    for report in &summary.categories {
        render_category(&mut out, report);
    }

    let kernel = &summary.kernel;
    out.push_str(&format!("{}\n", SEPARATOR));
    out.push_str("Kernels infos\n");
    match kernel.overall_tick_per_gas {
        Some(value) => out.push_str(&format!("Overall tick per gas: ~{:.0}\n", value)),
        None => out.push_str("Overall tick per gas: n/a\n"),
    }
    let lines = [
        ("Tick per gas", &kernel.tick_per_gas),
        ("Signature verification", &kernel.signature_verification),
        ("Decoding", &kernel.interpreter_decode),
        ("Initialisation", &kernel.interpreter_init),
        ("Transfer overhead", &kernel.transfer_overhead),
        ("Kernel run", &kernel.kernel_run),
    ];
    for (label, stats) in lines {
        out.push_str(&format!("{}: {}\n", label, avg_max(stats)));
    }

    let counts = &summary.counts;
    out.push_str(&format!("{}\n", SEPARATOR));
    out.push_str("Benchmark run infos\n");
    out.push_str(&format!("Total gas: {}\n", counts.total_gas));
    out.push_str(&format!("Total tick: {}\n", counts.total_ticks));
    out.push_str(&format!("Number of tx: {}\n", counts.transactions));
    out.push_str(&format!("Number of transfers: {}\n", counts.transfers));
    out.push_str(&format!("Number of create: {}\n", counts.creates));
    out.push_str(&format!("Number of call: {}\n", counts.calls));
    out.push_str(&format!("Number of kernel run: {}\n", counts.kernel_runs));
    out.push_str(&format!("Number of first run rows: {}\n", counts.first_runs));
    out.push_str(&format!(
        "Number of other bench rows (reboots, finalize and total lines): {}\n",
        counts.reboot_runs
    ));
    out.push_str(&format!(
        "Number of blocks: {} ({} without finalization)\n",
        counts.blocks, counts.unfinalized_blocks
    ));

    if !summary.skipped.is_empty() {
        out.push_str("Skipped samples:\n");
        for (field, count) in &summary.skipped {
            out.push_str(&format!("  missing {}: {}\n", field, count));
        }
    }
    out.push_str(&format!("{}\n", SEPARATOR));

    if summary.total_underestimates > 0 {
        out.push_str(&format!(
            "too many model underestimation {}\n",
            summary.total_underestimates
        ));
    }
    if summary.fit_failures > 0 {
        out.push_str(&format!(
            "{} cost models could not be fitted\n",
            summary.fit_failures
        ));
    }

    out
}

fn render_category(out: &mut String, report: &CategoryReport) {
    out.push_str(&format!("{}\n", SEPARATOR));
    out.push_str(&format!("{}\n", report.category.title()));

    render_fit(out, &report.fit);
    for variant in &report.variants {
        render_fit(out, variant);
    }

    let names = report.category.predictor_names();
    out.push_str(&format!(
        "current model: {}\n",
        report.reference.describe(names)
    ));

    let evaluation = &report.evaluation;
    out.push_str(&format!(
        "underestimations: {} / {} (max error: {:.0})\n",
        evaluation.error_count, evaluation.samples, evaluation.max_error
    ));
}

fn render_fit(out: &mut String, outcome: &FitOutcome) {
    let names: Vec<&str> = outcome.predictors.iter().map(String::as_str).collect();
    match (&outcome.model, &outcome.error) {
        (Some(fitted), _) => out.push_str(&format!(
            "fitted model: {} (R² {:.3}, {} samples)\n",
            fitted.model.describe(&names),
            fitted.r_squared,
            fitted.samples
        )),
        (None, Some(error)) => out.push_str(&format!(
            "fitted model on {}: FAILED ({})\n",
            names.join(", "),
            error
        )),
        (None, None) => {}
    }
}

fn avg_max(stats: &SampleStats) -> String {
    match (stats.average, stats.maximum) {
        (Some(avg), Some(max)) => format!("~{:.0} (max: {:.0})", avg, max),
        _ => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Accumulator;
    use crate::report::analyze;
    use crate::utils::config::AnalysisConfig;

    #[test]
    fn test_empty_run_report_mentions_failures() {
        let summary = analyze(&Accumulator::new(), &AnalysisConfig::default());
        let text = render_report(&summary);

        assert!(text.contains("Fetch Analysis"));
        assert!(text.contains("current model: Y = 165000 + 600 * size + 0 * nb_tx"));
        assert!(text.contains("FAILED (Insufficient data"));
        assert!(text.contains("4 cost models could not be fitted"));
        assert!(text.contains("Overall tick per gas: n/a"));
    }

    #[test]
    fn test_bench_row_counters_are_printed() {
        let mut acc = Accumulator::new();
        acc.nb_first_run = 2;
        acc.nb_reboot_run = 5;
        let text = render_report(&analyze(&acc, &AnalysisConfig::default()));

        assert!(text.contains("Number of first run rows: 2\n"));
        assert!(text.contains("Number of other bench rows (reboots, finalize and total lines): 5\n"));
    }
}
