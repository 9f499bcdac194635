//! Builds the log stream and metric lines for one call

use super::log::{LogLabels, LogPush, LogStream};
use super::metric::{MetricSample, MetricValue};
use super::record::CallRecord;

pub const INTEGRATION: &str = "openai";
pub const MEASUREMENT: &str = "openai";
pub const DEFAULT_SOURCE: &str = "rust";

pub const COMPLETION_TOKENS_FIELD: &str = "completionTokens";
pub const PROMPT_TOKENS_FIELD: &str = "promptTokens";
pub const TOTAL_TOKENS_FIELD: &str = "totalTokens";
pub const USAGE_COST_FIELD: &str = "usageCost";
pub const REQUEST_DURATION_FIELD: &str = "requestDuration";

/// Telemetry for one call: a single log stream and five metric samples
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryPayload {
    pub log: LogPush,
    pub metrics: Vec<MetricSample>,
}

impl TelemetryPayload {
    /// `timestamp_ns` is the send time in Unix nanoseconds, not the call start.
    pub fn build(record: &CallRecord<'_>, cost: f64, source: &str, timestamp_ns: i64) -> Self {
        Self {
            log: build_log(record, timestamp_ns),
            metrics: build_metrics(record, cost, source),
        }
    }
}

fn build_log(record: &CallRecord<'_>, timestamp_ns: i64) -> LogPush {
    let response = record.response;
    let usage = response.usage_or_default();

    let labels = LogLabels {
        integration: INTEGRATION.to_string(),
        prompt: record.prompt.clone(),
        model: record.reported_model().to_string(),
        role: response
            .role()
            .map(|r| r.as_str().to_string())
            .unwrap_or_default(),
        finish_reason: response
            .finish_reason()
            .map(|r| r.as_str().to_string())
            .unwrap_or_default(),
        prompt_tokens: usage.prompt_tokens.to_string(),
        completion_tokens: usage.completion_tokens.to_string(),
        total_tokens: usage.total_tokens.to_string(),
    };

    let content = response.content().unwrap_or_default();

    LogPush::single(LogStream::new(labels, timestamp_ns, content))
}

fn build_metrics(record: &CallRecord<'_>, cost: f64, source: &str) -> Vec<MetricSample> {
    let usage = record.response.usage_or_default();
    let tags = vec![
        ("integration".to_string(), INTEGRATION.to_string()),
        ("source".to_string(), source.to_string()),
        ("model".to_string(), record.reported_model().to_string()),
    ];

    [
        (
            COMPLETION_TOKENS_FIELD,
            MetricValue::Count(u64::from(usage.completion_tokens)),
        ),
        (
            PROMPT_TOKENS_FIELD,
            MetricValue::Count(u64::from(usage.prompt_tokens)),
        ),
        (
            TOTAL_TOKENS_FIELD,
            MetricValue::Count(u64::from(usage.total_tokens)),
        ),
        (USAGE_COST_FIELD, MetricValue::Gauge(cost)),
        (
            REQUEST_DURATION_FIELD,
            MetricValue::Gauge(record.duration.as_secs_f64()),
        ),
    ]
    .into_iter()
    .map(|(field, value)| MetricSample::new(MEASUREMENT, tags.clone(), field, value))
    .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::domain::llm::{Choice, FinishReason, LlmRequest, LlmResponse, Message, Usage};
    use crate::domain::telemetry::RequestSnapshot;

    fn gpt4_response() -> LlmResponse {
        LlmResponse::new("chatcmpl-1", "gpt-4")
            .with_choice(
                Choice::new(0, Message::assistant("Hello there"))
                    .with_finish_reason(FinishReason::Stop),
            )
            .with_usage(Usage::new(10, 5))
    }

    #[test]
    fn test_log_stream_labels() {
        let response = gpt4_response();
        let snapshot = RequestSnapshot::from(&LlmRequest::builder().model("gpt-4").user("hi").build());
        let record = CallRecord::new(&snapshot, Utc::now(), Duration::from_millis(250), &response);

        let payload = TelemetryPayload::build(&record, 0.0006, DEFAULT_SOURCE, 42);

        assert_eq!(payload.log.streams.len(), 1);
        let stream = &payload.log.streams[0];
        assert_eq!(stream.stream.integration, "openai");
        assert_eq!(stream.stream.prompt, "hi");
        assert_eq!(stream.stream.model, "gpt-4");
        assert_eq!(stream.stream.role, "assistant");
        assert_eq!(stream.stream.finish_reason, "stop");
        assert_eq!(stream.stream.prompt_tokens, "10");
        assert_eq!(stream.stream.completion_tokens, "5");
        assert_eq!(stream.stream.total_tokens, "15");
        assert_eq!(
            stream.values,
            vec![["42".to_string(), "Hello there".to_string()]]
        );
    }

    #[test]
    fn test_five_metric_lines_share_tags() {
        let response = gpt4_response();
        let snapshot = RequestSnapshot::from(&LlmRequest::builder().model("gpt-4").user("hi").build());
        let record = CallRecord::new(&snapshot, Utc::now(), Duration::from_millis(1500), &response);

        let payload = TelemetryPayload::build(&record, 0.0006, DEFAULT_SOURCE, 0);
        let lines: Vec<String> = payload.metrics.iter().map(MetricSample::to_line).collect();

        assert_eq!(
            lines,
            vec![
                "openai,integration=openai,source=rust,model=gpt-4 completionTokens=5",
                "openai,integration=openai,source=rust,model=gpt-4 promptTokens=10",
                "openai,integration=openai,source=rust,model=gpt-4 totalTokens=15",
                "openai,integration=openai,source=rust,model=gpt-4 usageCost=0.0006",
                "openai,integration=openai,source=rust,model=gpt-4 requestDuration=1.5",
            ]
        );
    }

    #[test]
    fn test_tags_use_reported_model() {
        let response = LlmResponse::new("id", "gpt-4-0613").with_usage(Usage::new(1, 1));
        let snapshot = RequestSnapshot::from(&LlmRequest::builder().model("gpt-4").build());
        let record = CallRecord::new(&snapshot, Utc::now(), Duration::ZERO, &response);

        let payload = TelemetryPayload::build(&record, 0.0, "python", 0);

        assert_eq!(payload.log.streams[0].stream.model, "gpt-4-0613");
        assert!(payload
            .metrics
            .iter()
            .all(|m| m.tag("model") == Some("gpt-4-0613") && m.tag("source") == Some("python")));
    }

    #[test]
    fn test_missing_choices_and_usage_degrade() {
        let response = LlmResponse::new("id", "gpt-4");
        let snapshot = RequestSnapshot::from(&LlmRequest::default());
        let record = CallRecord::new(&snapshot, Utc::now(), Duration::ZERO, &response);

        let payload = TelemetryPayload::build(&record, 0.0, DEFAULT_SOURCE, 7);
        let stream = &payload.log.streams[0];

        assert_eq!(stream.stream.prompt, "No prompt provided");
        assert_eq!(stream.stream.role, "");
        assert_eq!(stream.stream.finish_reason, "");
        assert_eq!(stream.stream.total_tokens, "0");
        assert_eq!(stream.values[0][1], "");
        assert_eq!(payload.metrics.len(), 5);
    }
}
