//! Local embedding backend using fastembed
//!
//! Runs the all-MiniLM-L6-v2 sentence model locally via ONNX Runtime.
//! The model is downloaded to the cache directory on first use and
//! loaded from cache afterwards.

use super::Embedder;
use crate::error::{BackendError, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Local embedding backend
pub struct LocalEmbedder {
    // fastembed's embed call needs &mut; interior mutability keeps the
    // backend shareable behind Arc.
    model: Mutex<TextEmbedding>,
}

impl LocalEmbedder {
    /// Load the sentence model, downloading it on first use.
    pub fn new(cache_dir: &Path) -> Result<Self> {
        info!(cache_dir = %cache_dir.display(), "Loading sentence embedding model");

        let options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_cache_dir(cache_dir.to_path_buf())
            .with_show_download_progress(false);

        let model = TextEmbedding::try_new(options)
            .map_err(|e| BackendError::Embedding(format!("Failed to load model: {e}")))?;

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for LocalEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(std::slice::from_ref(&text.to_string()))?
            .pop()
            .ok_or_else(|| BackendError::Embedding("No embedding returned".to_string()))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut model = self
            .model
            .lock()
            .map_err(|e| BackendError::Embedding(format!("Lock poisoned: {e}")))?;

        model
            .embed(texts.to_vec(), None)
            .map_err(|e| BackendError::Embedding(format!("Embedding generation failed: {e}")))
    }
}
