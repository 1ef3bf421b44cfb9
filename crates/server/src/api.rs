//! HTTP API assembly: shared state, error mapping and router wiring

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::json;
use server_lib::{
    chatbot::ChatEngine,
    error::BackendError,
    estimator::CostEstimator,
    health::ComponentStatus,
    store::Store,
    BackendMetrics, HealthRegistry, StructuredLogger,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::routes;

/// Shared application context, constructed once at startup and
/// immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<CostEstimator>,
    pub chat: Option<Arc<ChatEngine>>,
    pub store: Store,
    pub health_registry: HealthRegistry,
    pub metrics: BackendMetrics,
    pub logger: StructuredLogger,
    pub uploads_dir: PathBuf,
}

/// Wire-level error wrapper mapping the backend taxonomy onto HTTP
/// statuses. Validation problems surface verbatim; internal failures
/// are logged and masked with a generic message.
pub struct ApiError(BackendError);

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            BackendError::MissingField(_) | BackendError::Validation(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            BackendError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            BackendError::ModelUnavailable | BackendError::ChatUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
            }
            other => {
                tracing::error!(error = %other, "Unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::estimate::router())
        .merge(routes::chat::router())
        .merge(routes::projects::router())
        .merge(routes::meetings::router())
        .merge(routes::documents::router())
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
