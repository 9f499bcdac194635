use clap::Parser;
use grafana_llm_monitor::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => cli::check::run().await,
        Command::Chat(args) => cli::chat::run(args).await,
    }
}
