//! Construction cost estimation engine

mod breakdown;
mod features;
mod inference;

pub use breakdown::{allocate, percentage_table, COST_CATEGORIES};
pub use features::FeatureSet;
pub use inference::{OnnxCostModel, DEFAULT_FEATURE_NAMES};

use crate::error::{BackendError, Result};
use crate::models::{CostEstimate, CostEstimateRequest};
use std::sync::Arc;

/// Trait for cost model implementations
pub trait CostModel: Send + Sync {
    /// Ordered feature columns the model was trained on
    fn feature_names(&self) -> &[String];

    /// Predict the base cost from an aligned feature vector
    fn predict(&self, aligned: &[f32]) -> Result<f64>;

    /// Version tag of the loaded artifact
    fn version(&self) -> &str;
}

/// Stateless cost estimator over an optional loaded model
///
/// The model is loaded once at startup; when the artifact is absent the
/// estimator stays constructible and every estimate call reports
/// `ModelUnavailable` instead.
pub struct CostEstimator {
    model: Option<Arc<dyn CostModel>>,
}

impl CostEstimator {
    pub fn new(model: Arc<dyn CostModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Create an estimator with no model (every estimate fails cleanly).
    pub fn without_model() -> Self {
        Self { model: None }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_version(&self) -> Option<&str> {
        self.model.as_deref().map(|model| model.version())
    }

    /// Produce the final estimate for a validated request.
    ///
    /// Transform to the model's feature schema, predict the base cost,
    /// apply the construction-type and location multipliers, then split
    /// the result into the fixed category buckets. The reported
    /// `predicted_cost` is rounded to 2 decimals; contributions are
    /// allocated from the unrounded figure.
    pub fn estimate(&self, request: &CostEstimateRequest) -> Result<CostEstimate> {
        let model = self.model.as_ref().ok_or(BackendError::ModelUnavailable)?;

        let features = FeatureSet::from_request(request);
        let aligned = features.aligned(model.feature_names());

        let base_cost = model.predict(&aligned)?;
        if !base_cost.is_finite() {
            return Err(BackendError::Prediction(
                "Model returned a non-finite prediction".to_string(),
            ));
        }

        let final_cost = base_cost * request.construction_type.multiplier() * features.location;

        Ok(CostEstimate {
            predicted_cost: round2(final_cost),
            contributions: allocate(final_cost),
            percentage_contributions: percentage_table(),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConstructionType, Location, Quality};

    /// Deterministic stand-in model: base cost is a fixed multiple of
    /// the Area column, ignoring everything else.
    struct AreaModel {
        feature_names: Vec<String>,
        rate: f64,
    }

    impl AreaModel {
        fn new(rate: f64) -> Self {
            Self {
                feature_names: DEFAULT_FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                rate,
            }
        }
    }

    impl CostModel for AreaModel {
        fn feature_names(&self) -> &[String] {
            &self.feature_names
        }

        fn predict(&self, aligned: &[f32]) -> Result<f64> {
            Ok(f64::from(aligned[0]) * self.rate)
        }

        fn version(&self) -> &str {
            "test"
        }
    }

    fn request(
        location: Location,
        construction_type: ConstructionType,
    ) -> CostEstimateRequest {
        CostEstimateRequest {
            area: 1000.0,
            floors: 2,
            location,
            quality: Quality::Standard,
            construction_type,
            approx_cost: 800000.0,
        }
    }

    fn estimator() -> CostEstimator {
        CostEstimator::new(Arc::new(AreaModel::new(1500.0)))
    }

    #[test]
    fn test_residential_rural_is_base_cost() {
        let estimate = estimator()
            .estimate(&request(Location::Rural, ConstructionType::Residential))
            .unwrap();
        assert_eq!(estimate.predicted_cost, 1_500_000.0);
    }

    #[test]
    fn test_multipliers_compose_multiplicatively() {
        let base = estimator()
            .estimate(&request(Location::Rural, ConstructionType::Residential))
            .unwrap()
            .predicted_cost;

        let commercial = estimator()
            .estimate(&request(Location::Rural, ConstructionType::Commercial))
            .unwrap()
            .predicted_cost;
        assert!((commercial - base * 1.5).abs() < 0.01);

        let industrial_urban = estimator()
            .estimate(&request(Location::Urban, ConstructionType::Industrial))
            .unwrap()
            .predicted_cost;
        assert!((industrial_urban - base * 1.25 * 1.2).abs() < 0.01);
    }

    #[test]
    fn test_urban_never_cheaper_than_rural() {
        for construction_type in [
            ConstructionType::Residential,
            ConstructionType::Commercial,
            ConstructionType::Industrial,
        ] {
            let urban = estimator()
                .estimate(&request(Location::Urban, construction_type))
                .unwrap()
                .predicted_cost;
            let rural = estimator()
                .estimate(&request(Location::Rural, construction_type))
                .unwrap()
                .predicted_cost;
            assert!(urban >= rural);
        }
    }

    #[test]
    fn test_contributions_sum_to_predicted_cost() {
        let estimate = estimator()
            .estimate(&request(Location::Urban, ConstructionType::Commercial))
            .unwrap();

        let sum: f64 = estimate.contributions.values().sum();
        assert!((sum - estimate.predicted_cost).abs() < 0.01);

        let pct_sum: f64 = estimate.percentage_contributions.values().sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let est = estimator();
        let req = request(Location::Urban, ConstructionType::Industrial);
        let first = est.estimate(&req).unwrap();
        let second = est.estimate(&req).unwrap();
        assert_eq!(first.predicted_cost, second.predicted_cost);
        assert_eq!(first.contributions, second.contributions);
    }

    #[test]
    fn test_missing_model_reports_unavailable() {
        let est = CostEstimator::without_model();
        let err = est
            .estimate(&request(Location::Urban, ConstructionType::Residential))
            .unwrap_err();
        assert!(matches!(err, BackendError::ModelUnavailable));
    }

    #[test]
    fn test_nan_prediction_is_an_error() {
        struct NanModel(Vec<String>);
        impl CostModel for NanModel {
            fn feature_names(&self) -> &[String] {
                &self.0
            }
            fn predict(&self, _aligned: &[f32]) -> Result<f64> {
                Ok(f64::NAN)
            }
            fn version(&self) -> &str {
                "nan"
            }
        }

        let est = CostEstimator::new(Arc::new(NanModel(
            DEFAULT_FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        )));
        let err = est
            .estimate(&request(Location::Rural, ConstructionType::Residential))
            .unwrap_err();
        assert!(matches!(err, BackendError::Prediction(_)));
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let est = CostEstimator::new(Arc::new(AreaModel::new(1.23456)));
        let estimate = est
            .estimate(&request(Location::Rural, ConstructionType::Residential))
            .unwrap();
        let scaled = estimate.predicted_cost * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }
}
