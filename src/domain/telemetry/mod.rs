//! Telemetry payloads derived from a completed call

mod log;
mod metric;
mod payload;
mod record;

pub use log::{LogLabels, LogPush, LogStream};
pub use metric::{render_lines, MetricSample, MetricValue};
pub use payload::{
    TelemetryPayload, COMPLETION_TOKENS_FIELD, DEFAULT_SOURCE, INTEGRATION, MEASUREMENT,
    PROMPT_TOKENS_FIELD, REQUEST_DURATION_FIELD, TOTAL_TOKENS_FIELD, USAGE_COST_FIELD,
};
pub use record::{CallRecord, RequestSnapshot};
