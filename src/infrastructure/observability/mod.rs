//! In-process metrics about the monitor itself

mod metrics;

pub use self::metrics::{record_delivery_failure, record_monitored_call, MonitoredCallMetricParams};
