//! Policy Engine Server
//!
//! HTTP server exposing policy loading and access evaluation

use anyhow::Context;
use clap::Parser;
use policy_engine_rs::{PolicyService, ServerConfig};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "policy-engine-server")]
#[command(about = "HTTP server for IAM-style access policy evaluation")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Bind address [default: 127.0.0.1]
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port number [default: 3000]
    #[arg(short = 'P', long)]
    port: Option<u16>,

    /// Maximum cached decisions, 0 disables caching [default: 1024]
    #[arg(long)]
    cache_capacity: Option<usize>,
}

impl Args {
    /// Resolve the effective configuration: file first, then CLI overrides
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => ServerConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(cache_capacity) = self.cache_capacity {
            config.cache_capacity = cache_capacity;
        }

        Ok(config)
    }
}

/// Build the log filter from `RUST_LOG`-style directives, defaulting to `info`
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .init();

    let config = Args::parse().into_config()?;

    info!("Starting policy engine server");
    info!(
        "Config: host={}, port={}, cache_capacity={}, max_body_bytes={}",
        config.host, config.port, config.cache_capacity, config.max_body_bytes
    );

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let service = PolicyService::from_config(&config);

    policy_engine_rs::server::serve(listener, service, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down...");
    })
    .await?;

    info!("Server stopped");

    Ok(())
}
