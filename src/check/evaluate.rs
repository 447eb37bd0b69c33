//! Index failure evaluation and status message composition.

use super::{Metrics, PerfData, Report, Severity, Thresholds};

use std::time::Duration;

/// Build the final report from the collected metrics.
///
/// Without thresholds the check always reports OK with a summary.
pub fn evaluate_metrics(
    metrics: &Metrics,
    thresholds: Option<&Thresholds>,
    elapsed: Duration,
) -> Report {
    let severity = thresholds.map_or(Severity::Ok, |t| t.classify(metrics));

    let headline = match severity {
        Severity::Critical => "Index Failure above Critical Limit!\nService is running",
        Severity::Warning => "Index Failure above Warning Limit!\nService is running",
        _ => "Service is running!",
    };

    Report {
        severity,
        message: format!("{}\n{}", headline, summary(metrics, elapsed)),
        perf: PerfData {
            elapsed,
            metrics: metrics.clone(),
        },
    }
}

fn summary(metrics: &Metrics, elapsed: Duration) -> String {
    format!(
        "{} total events processed\n{} index failures\n{:.0} throughput\n{} sources\nCheck took {:?}",
        metrics.total_events, metrics.index_failures, metrics.throughput, metrics.sources, elapsed
    )
}
