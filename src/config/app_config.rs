use std::time::Duration;

use serde::Deserialize;

use crate::domain::telemetry::DEFAULT_SOURCE;
use crate::domain::{DeliveryPolicy, MonitorConfig};
use crate::infrastructure::monitor::MonitorOptions;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitor: MonitorSettings,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Backend credentials plus the knobs of the monitored provider
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub metrics_endpoint: String,
    pub logs_endpoint: String,
    pub metrics_principal: String,
    pub logs_principal: String,
    pub access_token: String,
    pub timeout_secs: u64,
    pub delivery_policy: DeliveryPolicy,
    pub source: String,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            metrics_endpoint: String::new(),
            logs_endpoint: String::new(),
            metrics_principal: String::new(),
            logs_principal: String::new(),
            access_token: String::new(),
            timeout_secs: 60,
            delivery_policy: DeliveryPolicy::default(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
        }
    }
}

impl MonitorSettings {
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig::new(
            &self.metrics_endpoint,
            &self.logs_endpoint,
            &self.metrics_principal,
            &self.logs_principal,
            &self.access_token,
        )
    }

    pub fn options(&self) -> MonitorOptions {
        MonitorOptions {
            delivery_policy: self.delivery_policy,
            timeout: Duration::from_secs(self.timeout_secs),
            source: self.source.clone(),
        }
    }
}

impl std::fmt::Debug for MonitorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorSettings")
            .field("metrics_endpoint", &self.metrics_endpoint)
            .field("logs_endpoint", &self.logs_endpoint)
            .field("metrics_principal", &self.metrics_principal)
            .field("logs_principal", &self.logs_principal)
            .field("access_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("delivery_policy", &self.delivery_policy)
            .field("source", &self.source)
            .finish()
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
