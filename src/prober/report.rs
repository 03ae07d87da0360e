// src/prober/report.rs
// Pure rendering of probe outcomes; the binary prints the lines.

use super::{ApiReport, HealthReport, ProbeError};

/// Console lines for a health probe outcome.
///
/// A degraded status renders as a warning, never an error; a failed probe
/// becomes a single labeled line.
pub fn render_health(outcome: &Result<HealthReport, ProbeError>) -> Vec<String> {
    let mut lines = Vec::new();
    match outcome {
        Ok(report) => {
            if let Some(instance) = &report.instance {
                lines.push(format!("Reading response from instance: {instance}"));
            }
            if report.health.is_nominal() {
                lines.push(format!(
                    "Service {} is {}",
                    report.health.service, report.health.status
                ));
            } else {
                lines.push(format!(
                    "WARNING: service {} reports status \"{}\"",
                    report.health.service, report.health.status
                ));
            }
        }
        Err(err) => lines.push(format!("ERROR: healthcheck probe failed: {err}")),
    }
    lines
}

/// Console lines for an API probe outcome. An empty directory is a warning,
/// distinguishing "zero registered endpoints" from "server is broken".
pub fn render_api(outcome: &Result<ApiReport, ProbeError>) -> Vec<String> {
    let mut lines = Vec::new();
    match outcome {
        Ok(report) => {
            if let Some(instance) = &report.instance {
                lines.push(format!("Reading response from instance: {instance}"));
            }
            if report.endpoints.is_empty() {
                lines.push("WARNING: API endpoints list is empty".to_owned());
            } else {
                lines.push("Received API endpoints list:".to_owned());
                for endpoint in &report.endpoints {
                    lines.push(format!(" - {endpoint}"));
                }
            }
        }
        Err(err) => lines.push(format!("ERROR: api probe failed: {err}")),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HealthStatus;

    #[test]
    fn nominal_health_renders_affirmatively() {
        let outcome = Ok(HealthReport {
            instance: Some("web-1".to_owned()),
            health: HealthStatus::new("Instrumental API", "healthy"),
        });
        let lines = render_health(&outcome);
        assert_eq!(lines[0], "Reading response from instance: web-1");
        assert_eq!(lines[1], "Service Instrumental API is healthy");
    }

    #[test]
    fn degraded_health_renders_as_warning() {
        let outcome = Ok(HealthReport {
            instance: None,
            health: HealthStatus::new("X", "degraded"),
        });
        let lines = render_health(&outcome);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("WARNING:"));
        assert!(lines[0].contains("degraded"));
    }

    #[test]
    fn failed_probe_renders_one_labeled_line() {
        let outcome = Err(ProbeError::Parse("missing field `status`".to_owned()));
        let lines = render_health(&outcome);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ERROR: healthcheck probe failed:"));
    }

    #[test]
    fn api_entries_render_one_line_each() {
        let outcome = Ok(ApiReport {
            instance: None,
            endpoints: vec![
                "a.example.com".to_owned(),
                "b.example.com".to_owned(),
                "c.example.com".to_owned(),
            ],
        });
        let lines = render_api(&outcome);
        let entries: Vec<_> = lines.iter().filter(|l| l.starts_with(" - ")).collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(lines[0], "Received API endpoints list:");
    }

    #[test]
    fn empty_api_list_is_a_warning_not_an_error() {
        let outcome = Ok(ApiReport {
            instance: None,
            endpoints: Vec::new(),
        });
        let lines = render_api(&outcome);
        assert_eq!(lines, vec!["WARNING: API endpoints list is empty".to_owned()]);
    }
}
