//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// SQLite database URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Path to the pretrained cost model artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Path to the chatbot FAQ dataset
    #[serde(default = "default_faq_dataset_path")]
    pub faq_dataset_path: String,

    /// Directory for uploaded documents
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,

    /// Cache directory for the sentence embedding model
    #[serde(default = "default_embed_cache_dir")]
    pub embed_cache_dir: String,
}

fn default_bind_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "sqlite://construction_mgmt.db".to_string()
}

fn default_model_path() -> String {
    "construction_cost_model.onnx".to_string()
}

fn default_faq_dataset_path() -> String {
    "construction_dataset.json".to_string()
}

fn default_uploads_dir() -> String {
    "uploads_new".to_string()
}

fn default_embed_cache_dir() -> String {
    ".fastembed_cache".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_port: default_bind_port(),
            database_url: default_database_url(),
            model_path: default_model_path(),
            faq_dataset_path: default_faq_dataset_path(),
            uploads_dir: default_uploads_dir(),
            embed_cache_dir: default_embed_cache_dir(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from CMT_-prefixed environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("CMT"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_port, 5000);
        assert_eq!(config.database_url, "sqlite://construction_mgmt.db");
        assert_eq!(config.model_path, "construction_cost_model.onnx");
        assert_eq!(config.uploads_dir, "uploads_new");
    }
}
