//! Error types for the construction-management backend
//!
//! A single tagged error type so request handlers can distinguish
//! validation failures from internal ones when mapping to HTTP statuses.

use thiserror::Error;

/// Fixed message returned when the cost model artifact is unavailable.
pub const MODEL_UNAVAILABLE_MESSAGE: &str =
    "Model not found. Ensure 'construction_cost_model.onnx' exists.";

/// Fixed message returned when the chat engine is unavailable.
pub const CHAT_UNAVAILABLE_MESSAGE: &str =
    "Chat engine not available. Ensure 'construction_dataset.json' exists.";

/// Main error type for backend operations
#[derive(Error, Debug)]
pub enum BackendError {
    /// A required request field was absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Invalid field value or unrecognized category
    #[error("{0}")]
    Validation(String),

    /// Requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Cost model artifact failed to load or is absent
    #[error("{MODEL_UNAVAILABLE_MESSAGE}")]
    ModelUnavailable,

    /// Chat engine failed to load or is absent
    #[error("{CHAT_UNAVAILABLE_MESSAGE}")]
    ChatUnavailable,

    /// Unexpected failure during feature transform or model invocation
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// Embedding generation failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl BackendError {
    /// Returns true if the error is the caller's fault (400-class).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BackendError::MissingField(_) | BackendError::Validation(_) | BackendError::NotFound(_)
        )
    }
}

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;
