//! Cost estimation endpoint

use crate::api::{ApiError, AppState};
use axum::{extract::State, routing::post, Json, Router};
use server_lib::models::{CostEstimate, CostEstimateRequest};
use std::time::Instant;

/// POST /predict - run the cost model on a raw estimate request
pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CostEstimate>, ApiError> {
    let request = CostEstimateRequest::from_json(&body)?;

    let start = Instant::now();
    let result = state.estimator.estimate(&request);
    state
        .metrics
        .observe_prediction_latency(start.elapsed().as_secs_f64());

    match result {
        Ok(estimate) => {
            state.metrics.inc_predictions_generated();
            state.logger.log_prediction(
                &format!("{:?}", request.construction_type),
                &format!("{:?}", request.location),
                request.area,
                request.floors,
                estimate.predicted_cost,
                state.estimator.model_version().unwrap_or("unknown"),
            );
            Ok(Json(estimate))
        }
        Err(err) => {
            state.metrics.inc_prediction_errors();
            Err(err.into())
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/predict", post(predict))
}
