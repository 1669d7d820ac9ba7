mod config;
mod errors;
mod routes;
mod upstream;

use std::net::SocketAddr;

use tracing::{info, warn};

use crate::config::ShellConfig;
use crate::errors::AppError;
use crate::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_shell=debug,tower_http=debug".into()),
        )
        .init();

    let config = ShellConfig::from_env()?;

    // ── Upstream chat backend ────────────────────────────────────────────────
    let upstream = UpstreamClient::new(config.upstream_url.clone())?;
    info!("Forwarding /api to {}", upstream.base_url());

    if !config.static_dir.join("index.html").exists() {
        warn!(
            "No index.html in {}; build the frontend with `trunk build` first",
            config.static_dir.display()
        );
    }

    let app = routes::router(upstream, &config);

    // ── Listen ───────────────────────────────────────────────────────────────
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::Io)?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
