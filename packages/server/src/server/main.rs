// Main entry point for the job graph API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ledger_rpc::{LedgerRpcOptions, LedgerRpcService};
use server_core::kernel::{HttpStreamProber, LedgerRpcAdapter, ServerDeps};
use server_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,ledger_rpc=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting job graph API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        ledger_rpc_url = %config.ledger_rpc_url,
        probe_concurrency = ?config.probe_concurrency,
        "Configuration loaded"
    );

    // Ledger RPC client
    let ledger = LedgerRpcService::new(LedgerRpcOptions {
        endpoint: config.ledger_rpc_url.clone(),
        timeout: Duration::from_secs(config.ledger_rpc_timeout_secs),
    })
    .context("Failed to create ledger RPC client")?;

    // Stream prober
    let prober = HttpStreamProber::new(Duration::from_secs(config.probe_timeout_secs))?;

    let server_deps = Arc::new(ServerDeps::new(
        Arc::new(LedgerRpcAdapter::new(Arc::new(ledger))),
        Arc::new(prober),
        config.probe_concurrency,
    ));

    // Build application
    let app = build_app(server_deps, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
