//! Construction-management backend server
//!
//! Serves the cost estimation, FAQ chatbot, project, meeting and
//! document APIs over HTTP, with the ML artifacts loaded once at
//! startup.

use anyhow::Result;
use construction_server::{api, config};
use server_lib::{
    chatbot::{self, ChatEngine, LocalEmbedder},
    estimator::{CostEstimator, CostModel, OnnxCostModel},
    health::{components, HealthRegistry},
    store::Store,
    BackendMetrics, StructuredLogger,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting construction-server");

    // Load configuration
    let config = config::ServerConfig::load()?;
    info!(port = config.bind_port, "Server configured");

    // Connect the store and make sure the schema exists
    let store = Store::connect(&config.database_url).await?;
    store.init_schema().await?;

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::COST_MODEL).await;
    health_registry.register(components::CHATBOT).await;
    health_registry.register(components::STORE).await;

    // Initialize metrics
    let metrics = BackendMetrics::new();

    // Load the cost model; a missing artifact degrades the component
    // instead of failing startup, and every /predict reports it.
    let estimator = match OnnxCostModel::load(Path::new(&config.model_path)) {
        Ok(model) => {
            metrics.set_model_version(model.version());
            Arc::new(CostEstimator::new(Arc::new(model)))
        }
        Err(e) => {
            warn!(error = %e, path = %config.model_path, "Cost model unavailable");
            health_registry
                .set_degraded(components::COST_MODEL, "Model artifact not loaded")
                .await;
            Arc::new(CostEstimator::without_model())
        }
    };

    // Load the chat engine (dataset + sentence model) the same way.
    let chat = match build_chat_engine(&config).await {
        Ok(engine) => Some(Arc::new(engine)),
        Err(e) => {
            warn!(error = %e, "Chat engine unavailable");
            health_registry
                .set_degraded(components::CHATBOT, "Chat engine not loaded")
                .await;
            None
        }
    };

    // Initialize structured logger
    let logger = StructuredLogger::new("construction-server");
    logger.log_startup(SERVER_VERSION, estimator.has_model(), chat.is_some());

    // Create shared application state
    let app_state = api::AppState {
        estimator,
        chat,
        store,
        health_registry: health_registry.clone(),
        metrics,
        logger: logger.clone(),
        uploads_dir: PathBuf::from(&config.uploads_dir),
    };

    // Mark server as ready after initialization
    health_registry.set_ready(true).await;

    // Serve until interrupted
    tokio::select! {
        result = api::serve(config.bind_port, app_state) => result?,
        _ = tokio::signal::ctrl_c() => {
            logger.log_shutdown("SIGINT received");
            info!("Shutting down");
        }
    }

    Ok(())
}

/// Load the FAQ dataset and sentence model off the async runtime.
async fn build_chat_engine(config: &config::ServerConfig) -> Result<ChatEngine> {
    let dataset_path = PathBuf::from(&config.faq_dataset_path);
    let cache_dir = PathBuf::from(&config.embed_cache_dir);

    let engine = tokio::task::spawn_blocking(move || -> server_lib::Result<ChatEngine> {
        let entries = chatbot::load_dataset(&dataset_path)?;
        let embedder = LocalEmbedder::new(&cache_dir)?;
        ChatEngine::new(entries, Arc::new(embedder))
    })
    .await??;

    Ok(engine)
}
