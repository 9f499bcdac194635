//! CLI module for the Grafana LLM monitor
//!
//! Provides subcommands:
//! - `check`: validate the monitor configuration and print the resolved endpoints
//! - `chat`: send one prompt through a monitored OpenAI provider

pub mod chat;
pub mod check;

use clap::{Parser, Subcommand};

/// Grafana LLM monitor - reports chat completions to Loki and Grafana Cloud metrics
#[derive(Parser)]
#[command(name = "grafana-llm-monitor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate the monitor configuration and print the normalized endpoints
    Check,

    /// Send a prompt through the monitored OpenAI provider
    Chat(chat::ChatArgs),
}
