use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ollama_gate::config::load_config;
use ollama_gate::http::HttpServer;
use ollama_gate::lifecycle::Shutdown;
use ollama_gate::net::load_tls_config;

#[derive(Parser)]
#[command(name = "ollama-gate")]
#[command(about = "Authenticating streaming reverse proxy", long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.conf")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ollama_gate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("ollama-gate v0.1.0 starting");

    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(path = %cli.config.display(), %error, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        upstream = %config.upstream_url,
        bind_address = %config.bind_address,
        tls = config.tls_files().is_some(),
        request_timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    let bind_address = config.normalized_bind_address();
    let server = HttpServer::new(config.clone());

    if let Some((cert_path, key_path)) = config.tls_files() {
        let tls = match load_tls_config(cert_path, key_path).await {
            Ok(tls) => tls,
            Err(error) => {
                tracing::error!(%error, "Failed to load TLS configuration");
                std::process::exit(1);
            }
        };
        let addr: SocketAddr = bind_address.parse().map_err(|e| {
            tracing::error!(address = %bind_address, "Invalid listener address");
            e
        })?;
        server.run_tls(addr, tls, server_shutdown).await?;
    } else {
        let listener = TcpListener::bind(&bind_address).await.map_err(|e| {
            tracing::error!(address = %bind_address, error = %e, "Failed to bind listener");
            e
        })?;
        server.run(listener, server_shutdown).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
