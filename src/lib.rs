//! Grafana LLM Monitor
//!
//! Wraps any chat-completion provider so that every successful call is reported to
//! Grafana Cloud:
//! - one Loki log stream with the prompt, model, role, finish reason and token counts
//! - five Influx line-protocol metrics (token counts, cost in USD, duration)
//!
//! ```ignore
//! use grafana_llm_monitor::{completion_fn, wrap, LlmProvider, MonitorConfig};
//!
//! let config = MonitorConfig::new(metrics_url, logs_url, metrics_user, logs_user, token);
//! let monitored = wrap(completion_fn(|request| async move { client.chat(request).await }), &config)?;
//! let response = monitored.chat(request).await?;
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    completion_fn, DeliveryPolicy, DomainError, LlmProvider, LlmRequest, LlmResponse,
    MonitorConfig, PriceTable, TelemetryKind,
};
pub use infrastructure::delivery::{HttpTelemetrySink, TelemetrySink};
pub use infrastructure::monitor::{wrap, MonitorOptions, MonitoredProvider};
