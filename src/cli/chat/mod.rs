//! Chat command - one monitored completion against OpenAI

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{LlmProvider, LlmRequest};
use crate::infrastructure::llm::{HttpClient, OpenAiProvider};
use crate::infrastructure::logging;
use crate::infrastructure::monitor::MonitoredProvider;

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(120);

/// Arguments for the chat command
#[derive(Args, Clone, Debug)]
pub struct ChatArgs {
    /// Model to request
    #[arg(long, default_value = "gpt-3.5-turbo")]
    pub model: String,

    /// Upper bound on completion tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Prompt sent as the single user message
    pub prompt: String,
}

impl ChatArgs {
    pub fn to_request(&self) -> LlmRequest {
        let mut builder = LlmRequest::builder()
            .model(&self.model)
            .prompt(&self.prompt);

        if let Some(max_tokens) = self.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        builder.build()
    }
}

/// Run a single monitored completion and print the answer
pub async fn run(args: ChatArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    if config.openai.api_key.trim().is_empty() {
        anyhow::bail!("openai.api_key is not configured (set APP__OPENAI__API_KEY)");
    }

    let client = HttpClient::with_timeout(COMPLETION_TIMEOUT)?;
    let provider =
        OpenAiProvider::with_base_url(client, &config.openai.api_key, &config.openai.base_url);

    let monitored = MonitoredProvider::new(
        provider,
        &config.monitor.monitor_config(),
        config.monitor.options(),
    )
    .context("invalid monitor configuration")?;

    let response = monitored.chat(args.to_request()).await?;
    let usage = response.usage_or_default();

    info!(
        model = %response.model,
        total_tokens = usage.total_tokens,
        "Completion received"
    );

    println!("{}", response.content().unwrap_or_default());

    Ok(())
}
