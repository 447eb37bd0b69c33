//! Check evaluation and status reporting.
//!
//! Everything here is a pure function of the fetched documents and the
//! configuration; printing and exiting happen in `main`.

mod evaluate;
mod health;
mod thresholds;

pub use evaluate::*;
pub use health::*;
pub use thresholds::*;

use crate::api::{ApiError, GraylogClient};

use std::fmt;
use std::time::{Duration, Instant};

/// Monitoring plugin states. The discriminant is the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl Severity {
    pub fn exit_code(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metric values collected from the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub total_events: u64,
    pub sources: u64,
    pub throughput: f64,
    pub index_failures: u64,
}

/// Performance data appended to every status line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerfData {
    pub elapsed: Duration,
    pub metrics: Metrics,
}

impl fmt::Display for PerfData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "time={:.6};;;; total={};;;; sources={};;;; throughput={:.0};;;; index_failures={};;;;",
            self.elapsed.as_secs_f64(),
            self.metrics.total_events,
            self.metrics.sources,
            self.metrics.throughput,
            self.metrics.index_failures,
        )
    }
}

/// Outcome of a single check run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub severity: Severity,
    pub message: String,
    pub perf: PerfData,
}

impl Report {
    /// A report carrying no metrics, used for aborted runs.
    pub fn failure(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            perf: PerfData::default(),
        }
    }
}

impl From<ApiError> for Report {
    fn from(err: ApiError) -> Self {
        tracing::debug!(error = ?err, "API query failed");
        Report::failure(err.severity(), err.to_string())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}|{}", self.severity, self.message, self.perf)
    }
}

/// Run the full check against the API.
///
/// `/system` is queried first; the metric endpoints are only queried when
/// the node itself is healthy. Any query error aborts the run.
pub async fn run_check(client: &GraylogClient, thresholds: Option<&Thresholds>) -> Report {
    match collect(client, thresholds).await {
        Ok(report) => report,
        Err(err) => err.into(),
    }
}

async fn collect(
    client: &GraylogClient,
    thresholds: Option<&Thresholds>,
) -> Result<Report, ApiError> {
    let start = Instant::now();

    let system = client.system().await?;
    if let Some(report) = evaluate_system(&system) {
        return Ok(report);
    }

    let index = client.indexer_failures().await?;
    let throughput = client.throughput().await?;
    let inputs = client.inputs().await?;
    let total = client.total_count().await?;

    let elapsed = start.elapsed();
    let metrics = Metrics {
        total_events: total.events,
        sources: inputs.total,
        throughput: throughput.throughput,
        index_failures: index.total,
    };
    tracing::debug!(?metrics, ?elapsed, "collected metrics");

    Ok(evaluate_metrics(&metrics, thresholds, elapsed))
}
