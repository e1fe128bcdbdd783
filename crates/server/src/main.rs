// Hostbench server
// Decision: Listens on :3000 by default so results line up with other runtimes' harnesses

use anyhow::{Context, Result};
use hostbench_server::{build_app, telemetry, ServerConfig, Services};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    telemetry::init_tracing(&config.log_filter);

    tracing::info!("hostbench-server starting...");

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    let services = Services::default();
    tracing::info!(kernel = services.kernel.name(), "Compute kernel configured");

    let app = build_app(services, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
