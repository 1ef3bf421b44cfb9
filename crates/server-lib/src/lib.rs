//! Core library for the construction-management backend
//!
//! This crate provides the core functionality for:
//! - ML-based construction cost estimation
//! - FAQ chatbot with semantic matching
//! - Project, task, meeting and document persistence
//! - Health checks and observability

pub mod chatbot;
pub mod error;
pub mod estimator;
pub mod health;
pub mod models;
pub mod observability;
pub mod store;

pub use error::{BackendError, Result};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{BackendMetrics, StructuredLogger};
