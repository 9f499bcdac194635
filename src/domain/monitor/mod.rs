//! Monitoring setup: backend configuration and delivery policy

mod config;
mod policy;

pub use config::{normalize_metrics_endpoint, MonitorConfig, ResolvedEndpoints};
pub use policy::DeliveryPolicy;
