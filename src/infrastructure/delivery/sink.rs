//! Telemetry sink trait

use async_trait::async_trait;

use crate::domain::{DomainError, LogPush, MetricSample};

#[cfg(test)]
use mockall::automock;

/// Destination for the per-call log stream and metric lines
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Push one log document to the logs backend
    async fn send_logs(&self, logs: &LogPush) -> Result<(), DomainError>;

    /// Push a batch of metric lines to the metrics backend in a single request
    async fn send_metrics(&self, samples: &[MetricSample]) -> Result<(), DomainError>;
}
