//! Domain layer - completion contract, pricing, telemetry payloads

pub mod error;
pub mod llm;
pub mod monitor;
pub mod telemetry;
pub mod usage;

pub use error::{DomainError, TelemetryKind};
pub use llm::{
    completion_fn, Choice, FinishReason, FnProvider, LlmProvider, LlmRequest, LlmRequestBuilder,
    LlmResponse, Message, MessageRole, Usage,
};
pub use monitor::{DeliveryPolicy, MonitorConfig, ResolvedEndpoints};
pub use telemetry::{CallRecord, LogPush, MetricSample, RequestSnapshot, TelemetryPayload};
pub use usage::{ModelPrice, PriceTable};
