use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::llm::{LlmRequest, LlmResponse};

/// Everything observed about one completed call
#[derive(Debug, Clone)]
pub struct CallRecord<'a> {
    pub prompt: String,
    pub request_model: Option<String>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub response: &'a LlmResponse,
}

impl<'a> CallRecord<'a> {
    pub fn new(
        request: &RequestSnapshot,
        started_at: DateTime<Utc>,
        duration: Duration,
        response: &'a LlmResponse,
    ) -> Self {
        Self {
            prompt: request.prompt.clone(),
            request_model: request.model.clone(),
            started_at,
            duration,
            response,
        }
    }

    /// Model used to look up prices: the requested one, else the one the backend reported
    pub fn pricing_model(&self) -> &str {
        self.request_model
            .as_deref()
            .unwrap_or(self.response.model.as_str())
    }

    /// Model used for tagging, always the one the backend reported
    pub fn reported_model(&self) -> &str {
        &self.response.model
    }
}

/// The request fields telemetry needs, captured before the request is handed off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub prompt: String,
    pub model: Option<String>,
}

impl From<&LlmRequest> for RequestSnapshot {
    fn from(request: &LlmRequest) -> Self {
        Self {
            prompt: request.resolved_prompt().to_string(),
            model: request.model.clone(),
        }
    }
}
