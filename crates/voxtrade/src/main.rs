use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "voxtrade", about = "Voice-activated order entry over HTTP")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/voxtrade.toml")]
    config: PathBuf,

    /// Override `server.bind_address`
    #[arg(short, long)]
    bind: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (respects RUST_LOG env var, defaults to info)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let config = voxtrade::load_config(&cli.config)?;
    let mut settings = voxtrade::resolve_settings(config, |k| std::env::var(k).ok())
        .context("Invalid configuration")?;
    if let Some(bind) = cli.bind {
        settings.config.server.bind_address = bind;
    }

    let app = voxtrade::build_app(&settings).context("Failed to build application")?;

    let addr = settings.config.server.bind_address.clone();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, broker = %settings.broker_host, "voxtrade listening");

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received shutdown signal");
            cancel.cancel();
        });
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("Server error")?;

    tracing::info!("voxtrade stopped");
    Ok(())
}
