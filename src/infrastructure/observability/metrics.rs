//! Counters and histograms recorded through the `metrics` facade.
//!
//! Nothing is exported unless the host application installs a recorder.

use std::time::Duration;

use metrics::{counter, histogram};

use crate::domain::TelemetryKind;

/// Parameters for a monitored call metric
pub struct MonitoredCallMetricParams<'a> {
    pub provider: &'a str,
    pub model: &'a str,
    pub duration: Duration,
    pub success: bool,
    pub cost_usd: Option<f64>,
}

/// Record one call that went through the monitor
pub fn record_monitored_call(params: MonitoredCallMetricParams) {
    let labels = [
        ("provider", params.provider.to_string()),
        ("model", params.model.to_string()),
        ("status", if params.success { "success" } else { "error" }.to_string()),
    ];

    counter!("llm_monitor_calls_total", &labels).increment(1);
    histogram!("llm_monitor_call_duration_seconds", &labels).record(params.duration.as_secs_f64());

    if let Some(cost) = params.cost_usd {
        histogram!("llm_monitor_call_cost_usd", &labels).record(cost);
    }
}

/// Record a failed push to one of the telemetry backends
pub fn record_delivery_failure(kind: TelemetryKind) {
    counter!("llm_monitor_delivery_failures_total", "kind" => kind.as_str()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitored_call_metric_params() {
        let params = MonitoredCallMetricParams {
            provider: "openai",
            model: "gpt-4",
            duration: Duration::from_millis(500),
            success: true,
            cost_usd: Some(0.0006),
        };

        assert_eq!(params.provider, "openai");
        assert_eq!(params.model, "gpt-4");
        assert!(params.success);

        // no recorder installed: must be a no-op
        record_monitored_call(params);
        record_delivery_failure(TelemetryKind::Logs);
    }
}
