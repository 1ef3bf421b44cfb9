//! ONNX Runtime inference using tract
//!
//! Loads the pretrained cost regression model once at startup and runs
//! single-row inference per request.

use super::CostModel;
use crate::error::{BackendError, Result};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

/// Feature columns the shipped model was trained on, in training order.
///
/// Used when the artifact has no sidecar feature list. The training
/// pipeline one-hot encodes with a dropped baseline per categorical
/// group, so `Quality_Basic`, `Type_Commercial` and the rural location
/// carry no column of their own.
pub const DEFAULT_FEATURE_NAMES: [&str; 20] = [
    "Area",
    "Floors",
    "ApproxCost",
    "Location_Urban",
    "Quality_Premium",
    "Quality_Standard",
    "Type_Industrial",
    "Type_Residential",
    "Floors_Location_Urban",
    "Floors_Quality_Premium",
    "Floors_Quality_Standard",
    "Floors_Type_Commercial",
    "Floors_Type_Industrial",
    "Area_Floors",
    "ApproxCost_Floors",
    "Location_ApproxCost",
    "Location_Floors",
    "Quality_Location_Urban",
    "Location",
    "Floors_Urban",
];

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX-based cost model using tract for lightweight inference
pub struct OnnxCostModel {
    plan: TractModel,
    feature_names: Vec<String>,
    version: String,
}

impl OnnxCostModel {
    /// Load the model artifact from disk.
    ///
    /// The declared feature-name list is read from a `*.features.json`
    /// sidecar next to the artifact when present, falling back to the
    /// built-in training order.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let feature_names = feature_names_for(path)?;
        let plan = Self::build_plan(&bytes, feature_names.len())?;

        info!(
            path = %path.display(),
            features = feature_names.len(),
            "Cost model loaded"
        );

        Ok(Self {
            plan,
            feature_names,
            version: "v6".to_string(),
        })
    }

    fn build_plan(model_bytes: &[u8], num_features: usize) -> Result<TractModel> {
        tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(model_bytes))
            .map_err(|e| BackendError::Prediction(format!("Failed to parse ONNX model: {e}")))?
            .with_input_fact(0, f32::fact([1, num_features]).into())
            .map_err(|e| BackendError::Prediction(format!("Failed to set input shape: {e}")))?
            .into_optimized()
            .map_err(|e| BackendError::Prediction(format!("Failed to optimize model: {e}")))?
            .into_runnable()
            .map_err(|e| BackendError::Prediction(format!("Failed to create runnable model: {e}")))
    }
}

impl CostModel for OnnxCostModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, aligned: &[f32]) -> Result<f64> {
        if aligned.len() != self.feature_names.len() {
            return Err(BackendError::Prediction(format!(
                "Feature vector has {} values, model expects {}",
                aligned.len(),
                self.feature_names.len()
            )));
        }

        let input: Tensor =
            tract_ndarray::Array2::from_shape_vec((1, aligned.len()), aligned.to_vec())
                .map_err(|e| BackendError::Prediction(format!("Failed to build tensor: {e}")))?
                .into();

        let result = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| BackendError::Prediction(format!("Model invocation failed: {e}")))?;

        let output = result
            .first()
            .ok_or_else(|| BackendError::Prediction("No output from model".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| BackendError::Prediction(format!("Unexpected output tensor: {e}")))?;
        let base_cost = view
            .iter()
            .next()
            .copied()
            .ok_or_else(|| BackendError::Prediction("Empty output from model".to_string()))?;

        debug!(base_cost, "Model inference completed");
        Ok(f64::from(base_cost))
    }

    fn version(&self) -> &str {
        &self.version
    }
}

/// Resolve the model's declared feature names.
fn feature_names_for(model_path: &Path) -> Result<Vec<String>> {
    let sidecar = model_path.with_extension("features.json");
    if sidecar.exists() {
        let raw = std::fs::read_to_string(&sidecar)?;
        let names: Vec<String> = serde_json::from_str(&raw)?;
        if names.is_empty() {
            return Err(BackendError::Prediction(
                "Sidecar feature list is empty".to_string(),
            ));
        }
        debug!(path = %sidecar.display(), count = names.len(), "Loaded sidecar feature list");
        return Ok(names);
    }
    Ok(DEFAULT_FEATURE_NAMES.iter().map(|s| s.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_feature_names_cover_training_pipeline() {
        assert_eq!(DEFAULT_FEATURE_NAMES.len(), 20);
        // Dropped baselines must not appear as columns.
        assert!(!DEFAULT_FEATURE_NAMES.contains(&"Quality_Basic"));
        assert!(!DEFAULT_FEATURE_NAMES.contains(&"Type_Commercial"));
        // The synthetic multiplier column is retained alongside the indicator.
        assert!(DEFAULT_FEATURE_NAMES.contains(&"Location"));
        assert!(DEFAULT_FEATURE_NAMES.contains(&"Location_Urban"));
    }

    #[test]
    fn test_feature_names_fall_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.onnx");

        let names = feature_names_for(&model_path).unwrap();
        assert_eq!(names.len(), DEFAULT_FEATURE_NAMES.len());
        assert_eq!(names[0], "Area");
    }

    #[test]
    fn test_feature_names_read_from_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.onnx");
        let sidecar = dir.path().join("model.features.json");

        let mut file = std::fs::File::create(&sidecar).unwrap();
        file.write_all(br#"["Area", "Floors", "Location"]"#).unwrap();

        let names = feature_names_for(&model_path).unwrap();
        assert_eq!(names, vec!["Area", "Floors", "Location"]);
    }

    #[test]
    fn test_empty_sidecar_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.onnx");
        let sidecar = dir.path().join("model.features.json");
        std::fs::write(&sidecar, "[]").unwrap();

        assert!(feature_names_for(&model_path).is_err());
    }

    #[test]
    fn test_load_missing_artifact_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.onnx");
        assert!(OnnxCostModel::load(&missing).is_err());
    }
}
