//! Monitored provider: times each completion, prices it, and ships telemetry

use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::telemetry::DEFAULT_SOURCE;
use crate::domain::{
    CallRecord, DeliveryPolicy, DomainError, LlmProvider, LlmRequest, LlmResponse, MonitorConfig,
    PriceTable, RequestSnapshot, TelemetryPayload,
};
use crate::infrastructure::delivery::{HttpTelemetrySink, TelemetrySink, DEFAULT_DELIVERY_TIMEOUT};
use crate::infrastructure::observability::{
    record_delivery_failure, record_monitored_call, MonitoredCallMetricParams,
};

static DEFAULT_PRICES: LazyLock<Arc<PriceTable>> =
    LazyLock::new(|| Arc::new(PriceTable::default()));

/// Knobs that do not belong to the backend credentials
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub delivery_policy: DeliveryPolicy,
    pub timeout: Duration,
    /// Value of the `source` metric tag
    pub source: String,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            delivery_policy: DeliveryPolicy::default(),
            timeout: DEFAULT_DELIVERY_TIMEOUT,
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

/// Wrap `provider` so every call is reported to the configured backends.
///
/// The configuration is validated and the endpoints normalized here, once; a bad
/// configuration fails before any call is made.
pub fn wrap<P: LlmProvider>(
    provider: P,
    config: &MonitorConfig,
) -> Result<MonitoredProvider<P>, DomainError> {
    MonitoredProvider::new(provider, config, MonitorOptions::default())
}

/// Drop-in [`LlmProvider`] that reports every call of the wrapped provider
pub struct MonitoredProvider<P, S = HttpTelemetrySink> {
    inner: P,
    sink: S,
    prices: Arc<PriceTable>,
    policy: DeliveryPolicy,
    source: String,
}

impl<P: LlmProvider> MonitoredProvider<P, HttpTelemetrySink> {
    pub fn new(
        provider: P,
        config: &MonitorConfig,
        options: MonitorOptions,
    ) -> Result<Self, DomainError> {
        let endpoints = config.normalize()?;

        info!(
            provider = provider.provider_name(),
            metrics_endpoint = %endpoints.metrics_endpoint,
            logs_endpoint = %endpoints.logs_endpoint,
            policy = ?options.delivery_policy,
            "Monitoring enabled"
        );

        let sink = HttpTelemetrySink::new(endpoints, config, options.timeout)?;

        Ok(Self::with_sink(provider, sink, options))
    }
}

impl<P, S> MonitoredProvider<P, S>
where
    P: LlmProvider,
    S: TelemetrySink,
{
    pub fn with_sink(provider: P, sink: S, options: MonitorOptions) -> Self {
        Self {
            inner: provider,
            sink,
            prices: Arc::clone(&DEFAULT_PRICES),
            policy: options.delivery_policy,
            source: options.source,
        }
    }

    pub fn with_price_table(mut self, prices: Arc<PriceTable>) -> Self {
        self.prices = prices;
        self
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Send logs, then metrics. Both are attempted; the policy decides whether a failure
    /// reaches the caller.
    async fn deliver(
        &self,
        call_id: &Uuid,
        payload: &TelemetryPayload,
    ) -> Result<(), DomainError> {
        let logs = self.sink.send_logs(&payload.log).await;
        let metrics = self.sink.send_metrics(&payload.metrics).await;

        let mut first_error = None;
        for result in [logs, metrics] {
            if let Err(error) = result {
                if let DomainError::Delivery { kind, .. } = &error {
                    record_delivery_failure(*kind);
                }
                warn!(call_id = %call_id, error = %error, "Telemetry delivery failed");
                first_error.get_or_insert(error);
            }
        }

        match first_error {
            Some(error) if self.policy.is_strict() => Err(error),
            _ => Ok(()),
        }
    }
}

impl<P: fmt::Debug, S> fmt::Debug for MonitoredProvider<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitoredProvider")
            .field("inner", &self.inner)
            .field("policy", &self.policy)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<P, S> LlmProvider for MonitoredProvider<P, S>
where
    P: LlmProvider,
    S: TelemetrySink,
{
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let call_id = Uuid::new_v4();
        let snapshot = RequestSnapshot::from(&request);

        let started_at = Utc::now();
        let start = Instant::now();
        let result = self.inner.chat(request).await;
        let duration = start.elapsed();

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                debug!(call_id = %call_id, error = %error, "Completion failed, nothing reported");
                record_monitored_call(MonitoredCallMetricParams {
                    provider: self.inner.provider_name(),
                    model: snapshot.model.as_deref().unwrap_or_default(),
                    duration,
                    success: false,
                    cost_usd: None,
                });
                return Err(error);
            }
        };

        let record = CallRecord::new(&snapshot, started_at, duration, &response);
        let usage = response.usage_or_default();
        let cost = self.prices.cost(
            record.pricing_model(),
            usage.prompt_tokens,
            usage.completion_tokens,
        );

        let timestamp_ns = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let payload = TelemetryPayload::build(&record, cost, &self.source, timestamp_ns);

        info!(
            call_id = %call_id,
            model = %record.reported_model(),
            duration_ms = duration.as_millis() as u64,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            cost_usd = cost,
            "Completion monitored"
        );

        record_monitored_call(MonitoredCallMetricParams {
            provider: self.inner.provider_name(),
            model: record.reported_model(),
            duration,
            success: true,
            cost_usd: Some(cost),
        });

        self.deliver(&call_id, &payload).await?;

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}
