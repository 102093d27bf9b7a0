mod bootstrap;
mod config;
mod outbox;
mod routes;

use anyhow::{Context, Result};
use cluster::{ClusteringEngine, OllamaTopicClient, UnavailableClusterer};
use extract::{OllamaAnnotator, OllamaClient};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LoggingConfig};
use crate::outbox::HttpOutbox;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    let outbox = HttpOutbox::new();
    let ollama = OllamaClient::new(config.ollama.base_url.clone(), config.ollama.model.clone());
    let annotator = OllamaAnnotator::new(ollama.clone());
    let engine: Arc<dyn ClusteringEngine> = if config.clustering.enabled {
        Arc::new(OllamaTopicClient::new(ollama))
    } else {
        tracing::warn!("Clustering is disabled, cluster requests will fail");
        Arc::new(UnavailableClusterer)
    };

    let system = bootstrap::start_actors(
        &config.actors,
        Arc::new(outbox.clone()),
        Arc::new(annotator),
        engine,
    )?;

    let state = Arc::new(AppState {
        directory: system.directory().clone(),
        outbox,
    });

    // Build router
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;

    tracing::info!("Server listening on http://{}", config.server.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutting down actors");
    system.shutdown().await;
    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
