//! HTTP delivery to the Loki and Influx push endpoints

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use super::sink::TelemetrySink;
use crate::domain::telemetry::render_lines;
use crate::domain::{
    DomainError, LogPush, MetricSample, MonitorConfig, ResolvedEndpoints, TelemetryKind,
};

pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(60);

const MAX_ERROR_BODY_CHARS: usize = 1000;

/// Sends telemetry with basic auth over a pooled reqwest client
#[derive(Clone)]
pub struct HttpTelemetrySink {
    client: Client,
    endpoints: ResolvedEndpoints,
    metrics_principal: String,
    logs_principal: String,
    access_token: String,
}

impl HttpTelemetrySink {
    /// `endpoints` must already be normalized.
    pub fn new(
        endpoints: ResolvedEndpoints,
        config: &MonitorConfig,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoints,
            metrics_principal: config.metrics_principal.clone(),
            logs_principal: config.logs_principal.clone(),
            access_token: config.access_token.clone(),
        })
    }

    async fn post(
        &self,
        kind: TelemetryKind,
        url: &str,
        principal: &str,
        content_type: &'static str,
        body: String,
    ) -> Result<(), DomainError> {
        let response = self
            .client
            .post(url)
            .basic_auth(principal, Some(&self.access_token))
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| DomainError::delivery(kind, format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();

            return Err(DomainError::delivery(
                kind,
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        debug!(kind = %kind, status = status.as_u16(), "Telemetry delivered");

        Ok(())
    }
}

impl fmt::Debug for HttpTelemetrySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTelemetrySink")
            .field("endpoints", &self.endpoints)
            .field("metrics_principal", &self.metrics_principal)
            .field("logs_principal", &self.logs_principal)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TelemetrySink for HttpTelemetrySink {
    async fn send_logs(&self, logs: &LogPush) -> Result<(), DomainError> {
        let body = serde_json::to_string(logs)
            .map_err(|e| DomainError::internal(format!("Failed to serialize logs: {}", e)))?;

        self.post(
            TelemetryKind::Logs,
            &self.endpoints.logs_endpoint,
            &self.logs_principal,
            "application/json",
            body,
        )
        .await
    }

    async fn send_metrics(&self, samples: &[MetricSample]) -> Result<(), DomainError> {
        self.post(
            TelemetryKind::Metrics,
            &self.endpoints.metrics_endpoint,
            &self.metrics_principal,
            "text/plain",
            render_lines(samples),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::telemetry::{LogLabels, LogStream, MetricValue};

    fn sink_for(server: &MockServer, timeout: Duration) -> HttpTelemetrySink {
        let config = MonitorConfig::new(
            format!("{}/api/prom/push", server.uri()),
            format!("{}/loki/api/v1/push/", server.uri()),
            "1139457",
            "668812",
            "glc_token",
        );
        let endpoints = config.normalize().unwrap();

        HttpTelemetrySink::new(endpoints, &config, timeout).unwrap()
    }

    fn basic(principal: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:glc_token", principal)))
    }

    fn sample_logs() -> LogPush {
        let labels = LogLabels {
            integration: "openai".to_string(),
            prompt: "hi".to_string(),
            model: "gpt-4".to_string(),
            role: "assistant".to_string(),
            finish_reason: "stop".to_string(),
            prompt_tokens: "10".to_string(),
            completion_tokens: "5".to_string(),
            total_tokens: "15".to_string(),
        };
        LogPush::single(LogStream::new(labels, 1, "hello"))
    }

    fn sample_metrics() -> Vec<MetricSample> {
        let tags = vec![("model".to_string(), "gpt-4".to_string())];
        vec![
            MetricSample::new("openai", tags.clone(), "promptTokens", MetricValue::Count(10)),
            MetricSample::new("openai", tags, "totalTokens", MetricValue::Count(15)),
        ]
    }

    #[tokio::test]
    async fn test_send_logs_posts_json_with_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/loki/api/v1/push"))
            .and(header("content-type", "application/json"))
            .and(header("authorization", basic("668812").as_str()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let sink = sink_for(&server, DEFAULT_DELIVERY_TIMEOUT);
        sink.send_logs(&sample_logs()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["streams"][0]["stream"]["total_tokens"], "15");
        assert_eq!(body["streams"][0]["values"][0][1], "hello");
    }

    #[tokio::test]
    async fn test_send_metrics_posts_newline_joined_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/prom/push"))
            .and(header("content-type", "text/plain"))
            .and(header("authorization", basic("1139457").as_str()))
            .and(body_string(
                "openai,model=gpt-4 promptTokens=10\nopenai,model=gpt-4 totalTokens=15",
            ))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let sink = sink_for(&server, DEFAULT_DELIVERY_TIMEOUT);
        sink.send_metrics(&sample_metrics()).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_delivery_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let sink = sink_for(&server, DEFAULT_DELIVERY_TIMEOUT);

        match sink.send_metrics(&sample_metrics()).await {
            Err(DomainError::Delivery { kind, message }) => {
                assert_eq!(kind, TelemetryKind::Metrics);
                assert!(message.contains("401"), "{message}");
                assert!(message.contains("invalid token"), "{message}");
            }
            other => panic!("expected delivery error, got {other:?}"),
        }

        match sink.send_logs(&sample_logs()).await {
            Err(DomainError::Delivery { kind, .. }) => assert_eq!(kind, TelemetryKind::Logs),
            other => panic!("expected delivery error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_delivery_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let sink = sink_for(&server, Duration::from_millis(100));
        let result = sink.send_logs(&sample_logs()).await;

        assert!(matches!(
            result,
            Err(DomainError::Delivery {
                kind: TelemetryKind::Logs,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_connection_error_is_delivery_error() {
        let config = MonitorConfig::new(
            "http://127.0.0.1:1/api/prom",
            "http://127.0.0.1:1/loki/api/v1/push",
            "m",
            "l",
            "t",
        );
        let endpoints = config.normalize().unwrap();
        let sink = HttpTelemetrySink::new(endpoints, &config, DEFAULT_DELIVERY_TIMEOUT).unwrap();

        let result = sink.send_metrics(&sample_metrics()).await;

        assert!(matches!(
            result,
            Err(DomainError::Delivery {
                kind: TelemetryKind::Metrics,
                ..
            })
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = MonitorConfig::new("http://x/api/prom", "http://y", "m", "l", "secret");
        let endpoints = config.normalize().unwrap();
        let sink = HttpTelemetrySink::new(endpoints, &config, DEFAULT_DELIVERY_TIMEOUT).unwrap();

        assert!(!format!("{:?}", sink).contains("secret"));
    }
}
