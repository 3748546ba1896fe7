//! album-review - Album review block service
//!
//! Serves the server-side render of album review blocks and proxies Last.fm
//! album lookups for the editor's album chooser.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use album_review::catalog::{AlbumCatalog, LastFmClient};
use album_review::AppState;
use album_review_common::config;
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments for album-review
#[derive(Parser, Debug)]
#[command(name = "album-review")]
#[command(about = "Album review block render and catalog service")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "ALBUM_REVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "ALBUM_REVIEW_PORT")]
    port: Option<u16>,

    /// Last.fm API key (overrides environment and config file)
    #[arg(long)]
    lastfm_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .or_else(config::default_config_path)
        .context("Could not determine config file location; pass --config")?;
    let toml_config = config::load_toml_config(&config_path)?;

    album_review::logging::init_tracing(&toml_config.logging)?;

    info!("Starting album-review service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Config: {}", config_path.display());

    let catalog: Option<Arc<dyn AlbumCatalog>> =
        match config::resolve_lastfm_api_key(args.lastfm_api_key.as_deref(), &toml_config) {
            Some(key) => {
                let client = LastFmClient::new(key, &toml_config.catalog_base_url)
                    .context("Failed to create Last.fm client")?;
                info!("Catalog: {}", client.base_url());
                let client: Arc<dyn AlbumCatalog> = Arc::new(client);
                Some(client)
            }
            None => {
                warn!("Album chooser disabled: no Last.fm API key");
                None
            }
        };

    let state = AppState::new(catalog);
    let app = album_review::build_router(state);

    let port = args.port.unwrap_or(toml_config.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
