//! Monitoring configuration and endpoint normalization

use std::fmt;

use crate::domain::DomainError;

const PROM_PATH: &str = "api/prom";
const INFLUX_WRITE_PATH: &str = "api/v1/push/influx/write";
const PROMETHEUS_HOST: &str = "prometheus";
const INFLUX_HOST: &str = "influx";
const LEGACY_REGION: &str = "-us-central1";
const LEGACY_REGION_ALIAS: &str = "-prod-06-prod-us-central-0";

/// Credentials and endpoints of the two telemetry backends
#[derive(Clone, Default)]
pub struct MonitorConfig {
    pub metrics_endpoint: String,
    pub logs_endpoint: String,
    pub metrics_principal: String,
    pub logs_principal: String,
    pub access_token: String,
}

impl MonitorConfig {
    pub fn new(
        metrics_endpoint: impl Into<String>,
        logs_endpoint: impl Into<String>,
        metrics_principal: impl Into<String>,
        logs_principal: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            metrics_endpoint: metrics_endpoint.into(),
            logs_endpoint: logs_endpoint.into(),
            metrics_principal: metrics_principal.into(),
            logs_principal: logs_principal.into(),
            access_token: access_token.into(),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("metrics_endpoint", &self.metrics_endpoint),
            ("logs_endpoint", &self.logs_endpoint),
            ("metrics_principal", &self.metrics_principal),
            ("logs_principal", &self.logs_principal),
            ("access_token", &self.access_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Validate the configuration and rewrite both endpoints into push form.
    pub fn normalize(&self) -> Result<ResolvedEndpoints, DomainError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::configuration(format!(
                "All parameters (metrics_endpoint, logs_endpoint, metrics_principal, \
                 logs_principal, access_token) must be provided; missing: {}",
                missing.join(", ")
            )));
        }

        Ok(ResolvedEndpoints {
            metrics_endpoint: normalize_metrics_endpoint(&self.metrics_endpoint)?,
            logs_endpoint: strip_trailing_slash(&self.logs_endpoint),
        })
    }
}

impl fmt::Debug for MonitorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorConfig")
            .field("metrics_endpoint", &self.metrics_endpoint)
            .field("logs_endpoint", &self.logs_endpoint)
            .field("metrics_principal", &self.metrics_principal)
            .field("logs_principal", &self.logs_principal)
            .field("access_token", &"[redacted]")
            .finish()
    }
}

/// Endpoints after validation and rewriting; immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoints {
    pub metrics_endpoint: String,
    pub logs_endpoint: String,
}

/// Rewrite a Prometheus remote-write URL into the equivalent Influx line-protocol push URL.
pub fn normalize_metrics_endpoint(endpoint: &str) -> Result<String, DomainError> {
    // already-rewritten endpoints are accepted as-is so normalization is idempotent
    if !endpoint.contains(PROM_PATH) && !endpoint.contains(INFLUX_WRITE_PATH) {
        return Err(DomainError::configuration(format!(
            "Invalid metrics URL format. It should contain '{}' in the URL: {}",
            PROM_PATH, endpoint
        )));
    }

    let mut endpoint = endpoint.to_string();

    if endpoint.contains(PROMETHEUS_HOST) {
        endpoint = endpoint
            .replace(PROMETHEUS_HOST, INFLUX_HOST)
            .replace(PROM_PATH, INFLUX_WRITE_PATH);

        if endpoint.contains(LEGACY_REGION) {
            endpoint = endpoint.replace(LEGACY_REGION, LEGACY_REGION_ALIAS);
        }
    }

    Ok(strip_trailing_slash(&endpoint))
}

fn strip_trailing_slash(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}
