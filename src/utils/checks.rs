// file: src/utils/checks.rs
// description: connectivity checks for the external services the digest depends on
// reference: operator-facing verify command

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    Ok,
    Degraded(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ServiceCheck {
    pub service: String,
    pub status: CheckStatus,
    pub latency_ms: u64,
}

impl ServiceCheck {
    pub fn ok(service: &str, latency: Duration) -> Self {
        Self {
            service: service.to_string(),
            status: CheckStatus::Ok,
            latency_ms: latency.as_millis() as u64,
        }
    }

    pub fn degraded(service: &str, message: String, latency: Duration) -> Self {
        Self {
            service: service.to_string(),
            status: CheckStatus::Degraded(message),
            latency_ms: latency.as_millis() as u64,
        }
    }

    pub fn failed(service: &str, message: String, latency: Duration) -> Self {
        Self {
            service: service.to_string(),
            status: CheckStatus::Failed(message),
            latency_ms: latency.as_millis() as u64,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

/// Render a set of checks as a human-readable report. The run is considered
/// unhealthy only if a check failed outright; a degraded summarizer still
/// produces digests through the local fallback.
pub fn format_report(checks: &[ServiceCheck]) -> String {
    let any_failed = checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Failed(_)));
    let any_degraded = checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Degraded(_)));

    let overall = if any_failed {
        "UNHEALTHY"
    } else if any_degraded {
        "DEGRADED"
    } else {
        "HEALTHY"
    };

    let mut output = format!("Service status: {}\n\n", overall);

    for check in checks {
        let (icon, detail) = match &check.status {
            CheckStatus::Ok => ("✓", None),
            CheckStatus::Degraded(msg) => ("⚠", Some(msg)),
            CheckStatus::Failed(msg) => ("✗", Some(msg)),
        };

        output.push_str(&format!(
            "{} {} - {}ms\n",
            icon, check.service, check.latency_ms
        ));

        if let Some(msg) = detail {
            output.push_str(&format!("  {}\n", msg));
        }
    }

    output
}
