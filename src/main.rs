//! Exporter entry point: CLI flags, tracing, config, HTTP serving.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use leontp_exporter::collector::FleetCollector;
use leontp_exporter::config::Config;
use leontp_exporter::poller::StatusPoller;
use leontp_exporter::server::{self, AppState};

#[derive(Debug, Parser)]
#[command(
    name = "leontp_exporter",
    version,
    about = "Prometheus exporter for LeoNTP GPS-disciplined NTP servers"
)]
struct Args {
    /// Address on which to expose metrics.
    #[arg(long, default_value = "0.0.0.0:9330")]
    listen_address: String,

    /// Path under which to expose metrics.
    #[arg(long = "path", default_value = "/metrics")]
    metrics_path: String,

    /// Path to the device roster config file.
    #[arg(long, default_value = "config.yml")]
    config_file: PathBuf,
}

fn init_tracing() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,leontp_exporter=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    anyhow::ensure!(
        args.metrics_path.starts_with('/'),
        "metrics path must start with '/'"
    );

    let config = Config::load(&args.config_file)
        .with_context(|| format!("loading {}", args.config_file.display()))?;

    anyhow::ensure!(
        config.cycle_timeout() > config.poll_timeout(),
        "cycle_timeout_ms must exceed poll_timeout_ms"
    );

    tracing::info!(
        version = leontp_exporter::VERSION,
        devices = config.nodes.len(),
        poll_timeout = ?config.poll_timeout(),
        "starting LeoNTP exporter"
    );

    let poller = StatusPoller::with_port(config.port, config.poll_timeout());
    let collector = Arc::new(FleetCollector::new(
        config.nodes.clone(),
        poller,
        config.cycle_timeout(),
    ));

    let app = server::router(AppState {
        collector,
        metrics_path: args.metrics_path.clone(),
    });
    let listener = tokio::net::TcpListener::bind(&args.listen_address)
        .await
        .with_context(|| format!("binding {}", args.listen_address))?;
    tracing::info!(
        listen = %args.listen_address,
        path = %args.metrics_path,
        "HTTP listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
