//! Price Estimator Server
//!
//! HTTP service exposing a health check and a Gemini-backed price estimate

use anyhow::{Context, Result};
use price_estimator::utils::logging::init_logging;
use price_estimator::{create_router, version_info, Settings, TextGenerator, VertexProvider};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging);
    info!("Starting {}", version_info());

    let provider = VertexProvider::new(&settings).context("Failed to create Vertex AI provider")?;
    info!(
        "🤖 Using model {} in {} (project {})",
        settings.vertex.model, settings.vertex.location, settings.vertex.project_id
    );

    let generator: Arc<dyn TextGenerator> = Arc::new(provider);
    let app = create_router(&settings, generator);

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Price estimator started!");
    info!("📝 Health check: http://{}/health_check", addr);
    info!("💴 Estimate endpoint: http://{}/estimate_price", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
