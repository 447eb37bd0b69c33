//! Node health conditions from the `/system` document.

use super::{Report, Severity};
use crate::api::SystemStatus;

const RUNNING: &str = "running";
const ALIVE: &str = "alive";

/// Evaluate the processing, lifecycle and load balancer conditions.
///
/// All three are checked. Returns `None` when the node is healthy,
/// otherwise a report with the highest severity found and one line per
/// failing condition.
pub fn evaluate_system(status: &SystemStatus) -> Option<Report> {
    let mut findings: Vec<(Severity, String)> = Vec::new();

    if !status.is_processing {
        findings.push((Severity::Critical, "Service is not processing!".to_string()));
    }
    if status.lifecycle != RUNNING {
        findings.push((Severity::Warning, format!("lifecycle: {}", status.lifecycle)));
    }
    if status.lb_status != ALIVE {
        findings.push((Severity::Warning, format!("lb_status: {}", status.lb_status)));
    }

    let severity = findings.iter().map(|(s, _)| *s).max()?;
    let message = findings
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n");

    Some(Report::failure(severity, message))
}
