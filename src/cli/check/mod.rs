//! Check command - validates the monitor configuration without calling any backend

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Validate and print the normalized endpoints
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let endpoints = config.monitor.monitor_config().normalize()?;
    info!(policy = ?config.monitor.delivery_policy, "Monitor configuration is valid");

    println!("metrics endpoint: {}", endpoints.metrics_endpoint);
    println!("logs endpoint:    {}", endpoints.logs_endpoint);

    Ok(())
}
