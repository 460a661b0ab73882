use anyhow::{Context, Result};
use clap::Parser;
use job_genie::cli::{handle_command, Cli};
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_PATH: &str = "/tmp/jobgenie.log";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging first
    let log_path = std::env::var("JOBGENIE_LOG").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    info!("Starting JobGenie");

    handle_command(cli).await
}
