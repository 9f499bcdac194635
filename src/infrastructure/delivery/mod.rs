//! Telemetry delivery to the logs and metrics backends

mod http;
mod sink;

pub use http::{HttpTelemetrySink, DEFAULT_DELIVERY_TIMEOUT};
pub use sink::TelemetrySink;

#[cfg(test)]
pub use sink::MockTelemetrySink;
