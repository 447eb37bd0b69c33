//! Index failure thresholds.

use super::{Metrics, Severity};
use crate::config::ConfigError;

/// How threshold values are compared against the index failure count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMode {
    /// Raw failure count, breached at or above the limit.
    Absolute,
    /// Failures as a percentage of total events, breached strictly above.
    Percent,
}

/// Warning and critical limits for index failures.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub mode: ThresholdMode,
    pub warning: f64,
    pub critical: f64,
}

impl Thresholds {
    /// Parse the `-w` / `-c` values.
    ///
    /// Percentage mode needs a trailing `%` on both values; otherwise both
    /// must be plain numbers.
    pub fn parse(warning: &str, critical: &str) -> Result<Self, ConfigError> {
        match (warning.strip_suffix('%'), critical.strip_suffix('%')) {
            (Some(w), Some(c)) => Ok(Self {
                mode: ThresholdMode::Percent,
                warning: parse_limit("warning", w)?,
                critical: parse_limit("critical", c)?,
            }),
            _ => Ok(Self {
                mode: ThresholdMode::Absolute,
                warning: parse_limit("warning", warning)?,
                critical: parse_limit("critical", critical)?,
            }),
        }
    }

    /// Severity of the given metrics against these limits.
    pub fn classify(&self, metrics: &Metrics) -> Severity {
        match self.mode {
            ThresholdMode::Percent => {
                let pct = failure_percentage(metrics);
                if pct > self.critical {
                    Severity::Critical
                } else if pct > self.warning {
                    Severity::Warning
                } else {
                    Severity::Ok
                }
            }
            ThresholdMode::Absolute => {
                let count = metrics.index_failures as f64;
                if count >= self.critical {
                    Severity::Critical
                } else if count >= self.warning {
                    Severity::Warning
                } else {
                    Severity::Ok
                }
            }
        }
    }
}

/// Index failures as a percentage of total processed events.
///
/// With no events at all the ratio is 0% without failures and unbounded
/// with, so any failure breaches every percentage limit.
pub fn failure_percentage(metrics: &Metrics) -> f64 {
    if metrics.total_events == 0 {
        return if metrics.index_failures == 0 {
            0.0
        } else {
            f64::INFINITY
        };
    }
    metrics.index_failures as f64 * 100.0 / metrics.total_events as f64
}

fn parse_limit(level: &'static str, value: &str) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(limit) if limit.is_finite() => Ok(limit),
        _ => Err(ConfigError::InvalidThreshold {
            level,
            value: value.to_string(),
        }),
    }
}
