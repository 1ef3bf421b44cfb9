//! Observability infrastructure for the backend
//!
//! Provides:
//! - Prometheus metrics (prediction latency, request counters, model version)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, GaugeVec, Histogram, IntCounter,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<BackendMetricsInner> = OnceLock::new();

struct BackendMetricsInner {
    prediction_latency_seconds: Histogram,
    predictions_generated: IntCounter,
    prediction_errors: IntCounter,
    chat_requests: IntCounter,
    chat_fallbacks: IntCounter,
    documents_uploaded: IntCounter,
    model_version_info: GaugeVec,
}

impl BackendMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "construction_backend_prediction_latency_seconds",
                "Time spent running cost model inference",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_generated: register_int_counter!(
                "construction_backend_predictions_generated_total",
                "Total number of cost predictions generated"
            )
            .expect("Failed to register predictions_generated"),

            prediction_errors: register_int_counter!(
                "construction_backend_prediction_errors_total",
                "Total number of failed cost predictions"
            )
            .expect("Failed to register prediction_errors"),

            chat_requests: register_int_counter!(
                "construction_backend_chat_requests_total",
                "Total number of chatbot queries"
            )
            .expect("Failed to register chat_requests"),

            chat_fallbacks: register_int_counter!(
                "construction_backend_chat_fallbacks_total",
                "Chatbot queries answered with the generic fallback"
            )
            .expect("Failed to register chat_fallbacks"),

            documents_uploaded: register_int_counter!(
                "construction_backend_documents_uploaded_total",
                "Total number of uploaded documents"
            )
            .expect("Failed to register documents_uploaded"),

            model_version_info: register_gauge_vec!(
                "construction_backend_model_version_info",
                "Information about the currently loaded cost model",
                &["version"]
            )
            .expect("Failed to register model_version_info"),
        }
    }
}

/// Backend metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct BackendMetrics {
    _private: (),
}

impl Default for BackendMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(BackendMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &BackendMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    pub fn inc_predictions_generated(&self) {
        self.inner().predictions_generated.inc();
    }

    pub fn inc_prediction_errors(&self) {
        self.inner().prediction_errors.inc();
    }

    pub fn inc_chat_requests(&self) {
        self.inner().chat_requests.inc();
    }

    pub fn inc_chat_fallbacks(&self) {
        self.inner().chat_fallbacks.inc();
    }

    pub fn inc_documents_uploaded(&self) {
        self.inner().documents_uploaded.inc();
    }

    pub fn set_model_version(&self, version: &str) {
        self.inner().model_version_info.reset();
        self.inner()
            .model_version_info
            .with_label_values(&[version])
            .set(1.0);
    }
}

/// Structured logger for significant backend events
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    /// Log a completed cost prediction
    pub fn log_prediction(
        &self,
        construction_type: &str,
        location: &str,
        area: f64,
        floors: u32,
        predicted_cost: f64,
        model_version: &str,
    ) {
        info!(
            event = "prediction_generated",
            instance = %self.instance,
            construction_type = %construction_type,
            location = %location,
            area = area,
            floors = floors,
            predicted_cost = predicted_cost,
            model_version = %model_version,
            "Generated cost prediction"
        );
    }

    /// Log a chatbot exchange outcome
    pub fn log_chat(&self, match_kind: &str) {
        info!(
            event = "chat_reply",
            instance = %self.instance,
            match_kind = %match_kind,
            "Answered chat query"
        );
    }

    /// Log a document upload
    pub fn log_upload(&self, document_id: i64, file_name: &str) {
        info!(
            event = "document_uploaded",
            instance = %self.instance,
            document_id = document_id,
            file_name = %file_name,
            "Stored uploaded document"
        );
    }

    /// Log a server-side failure that is masked on the wire
    pub fn log_internal_error(&self, route: &str, detail: &str) {
        warn!(
            event = "internal_error",
            instance = %self.instance,
            route = %route,
            detail = %detail,
            "Request failed"
        );
    }

    /// Log server startup
    pub fn log_startup(&self, version: &str, model_loaded: bool, chatbot_loaded: bool) {
        info!(
            event = "server_started",
            instance = %self.instance,
            server_version = %version,
            model_loaded = model_loaded,
            chatbot_loaded = chatbot_loaded,
            "Construction backend started"
        );
    }

    /// Log server shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "server_shutdown",
            instance = %self.instance,
            reason = %reason,
            "Construction backend shutting down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_handle() {
        let metrics = BackendMetrics::new();

        metrics.observe_prediction_latency(0.002);
        metrics.inc_predictions_generated();
        metrics.inc_prediction_errors();
        metrics.inc_chat_requests();
        metrics.inc_chat_fallbacks();
        metrics.inc_documents_uploaded();
        metrics.set_model_version("v6");
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("test-instance");
        assert_eq!(logger.instance, "test-instance");
    }
}
