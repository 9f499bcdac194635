//! Loki push document

use serde::Serialize;

/// Labels attached to the single stream emitted per call.
///
/// Loki requires string label values, so token counts are stored as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLabels {
    pub integration: String,
    pub prompt: String,
    pub model: String,
    pub role: String,
    pub finish_reason: String,
    pub prompt_tokens: String,
    pub completion_tokens: String,
    pub total_tokens: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogStream {
    pub stream: LogLabels,
    /// `[unix_nanoseconds, line]` pairs
    pub values: Vec<[String; 2]>,
}

impl LogStream {
    pub fn new(stream: LogLabels, timestamp_ns: i64, line: impl Into<String>) -> Self {
        Self {
            stream,
            values: vec![[timestamp_ns.to_string(), line.into()]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogPush {
    pub streams: Vec<LogStream>,
}

impl LogPush {
    pub fn single(stream: LogStream) -> Self {
        Self {
            streams: vec![stream],
        }
    }
}
