//! Feature construction for cost model inference
//!
//! Maps a raw cost estimate request into the numeric feature set the
//! trained model expects: base numerics, drop-first one-hot indicators
//! for the categorical fields, and a fixed set of interaction terms.
//! The set is assembled as a typed record so a misspelled column can
//! not silently become a zero; alignment to the model's declared column
//! order happens last.

use crate::models::{ConstructionType, CostEstimateRequest, Quality};

/// Fully materialized feature set for one request
///
/// Field values mirror the training pipeline exactly: indicators are
/// 0/1, interactions are products of the named fields, and `location`
/// is the synthetic 1.2/1.0 multiplier column kept alongside the
/// `location_urban` indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub area: f64,
    pub floors: f64,
    pub approx_cost: f64,

    pub location_urban: f64,
    pub quality_basic: f64,
    pub quality_standard: f64,
    pub quality_premium: f64,
    pub type_residential: f64,
    pub type_commercial: f64,
    pub type_industrial: f64,

    pub floors_location_urban: f64,
    pub floors_quality_premium: f64,
    pub floors_quality_standard: f64,
    pub floors_type_commercial: f64,
    pub floors_type_industrial: f64,
    pub area_floors: f64,
    pub approx_cost_floors: f64,
    pub location_approx_cost: f64,
    pub location_floors: f64,
    pub quality_location_urban: f64,

    /// Synthetic urban cost multiplier (1.2 or 1.0), distinct from the
    /// `location_urban` indicator.
    pub location: f64,
    pub floors_urban: f64,
}

impl FeatureSet {
    /// Build the feature set from a validated request.
    pub fn from_request(request: &CostEstimateRequest) -> Self {
        let area = request.area;
        let floors = f64::from(request.floors);
        let approx_cost = request.approx_cost;

        let location_urban = if request.location.is_urban() { 1.0 } else { 0.0 };
        let quality_basic = indicator(request.quality == Quality::Basic);
        let quality_standard = indicator(request.quality == Quality::Standard);
        let quality_premium = indicator(request.quality == Quality::Premium);
        let type_residential =
            indicator(request.construction_type == ConstructionType::Residential);
        let type_commercial = indicator(request.construction_type == ConstructionType::Commercial);
        let type_industrial = indicator(request.construction_type == ConstructionType::Industrial);

        let location = request.location.multiplier();

        Self {
            area,
            floors,
            approx_cost,
            location_urban,
            quality_basic,
            quality_standard,
            quality_premium,
            type_residential,
            type_commercial,
            type_industrial,
            floors_location_urban: floors * location_urban,
            floors_quality_premium: floors * quality_premium,
            floors_quality_standard: floors * quality_standard,
            floors_type_commercial: floors * type_commercial,
            floors_type_industrial: floors * type_industrial,
            area_floors: area * floors,
            approx_cost_floors: approx_cost * floors,
            location_approx_cost: location_urban * approx_cost,
            location_floors: location_urban * floors,
            quality_location_urban: quality_premium * location_urban,
            location,
            floors_urban: floors * location,
        }
    }

    /// Look up a feature by its model column name.
    ///
    /// Columns the transform does not compute resolve to 0, which is
    /// how the alignment step fills gaps in the model's schema.
    pub fn value(&self, name: &str) -> f64 {
        match name {
            "Area" => self.area,
            "Floors" => self.floors,
            "ApproxCost" => self.approx_cost,
            "Location_Urban" => self.location_urban,
            "Quality_Basic" => self.quality_basic,
            "Quality_Standard" => self.quality_standard,
            "Quality_Premium" => self.quality_premium,
            "Type_Residential" => self.type_residential,
            "Type_Commercial" => self.type_commercial,
            "Type_Industrial" => self.type_industrial,
            "Floors_Location_Urban" => self.floors_location_urban,
            "Floors_Quality_Premium" => self.floors_quality_premium,
            "Floors_Quality_Standard" => self.floors_quality_standard,
            "Floors_Type_Commercial" => self.floors_type_commercial,
            "Floors_Type_Industrial" => self.floors_type_industrial,
            "Area_Floors" => self.area_floors,
            "ApproxCost_Floors" => self.approx_cost_floors,
            "Location_ApproxCost" => self.location_approx_cost,
            "Location_Floors" => self.location_floors,
            "Quality_Location_Urban" => self.quality_location_urban,
            "Location" => self.location,
            "Floors_Urban" => self.floors_urban,
            _ => 0.0,
        }
    }

    /// Align the feature set to the model's declared column order.
    ///
    /// Declared columns absent from the computed set become 0; computed
    /// values with no declared column are dropped.
    pub fn aligned(&self, feature_names: &[String]) -> Vec<f32> {
        feature_names
            .iter()
            .map(|name| self.value(name) as f32)
            .collect()
    }
}

fn indicator(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn request(
        location: Location,
        quality: Quality,
        construction_type: ConstructionType,
    ) -> CostEstimateRequest {
        CostEstimateRequest {
            area: 1200.0,
            floors: 3,
            location,
            quality,
            construction_type,
            approx_cost: 500000.0,
        }
    }

    #[test]
    fn test_urban_premium_commercial_features() {
        let features = FeatureSet::from_request(&request(
            Location::Urban,
            Quality::Premium,
            ConstructionType::Commercial,
        ));

        assert_eq!(features.area, 1200.0);
        assert_eq!(features.floors, 3.0);
        assert_eq!(features.approx_cost, 500000.0);

        assert_eq!(features.location_urban, 1.0);
        assert_eq!(features.quality_premium, 1.0);
        assert_eq!(features.quality_basic, 0.0);
        assert_eq!(features.quality_standard, 0.0);
        assert_eq!(features.type_commercial, 1.0);
        assert_eq!(features.type_residential, 0.0);

        assert_eq!(features.floors_location_urban, 3.0);
        assert_eq!(features.floors_quality_premium, 3.0);
        assert_eq!(features.floors_quality_standard, 0.0);
        assert_eq!(features.floors_type_commercial, 3.0);
        assert_eq!(features.floors_type_industrial, 0.0);
        assert_eq!(features.area_floors, 3600.0);
        assert_eq!(features.approx_cost_floors, 1500000.0);
        assert_eq!(features.location_approx_cost, 500000.0);
        assert_eq!(features.location_floors, 3.0);
        assert_eq!(features.quality_location_urban, 1.0);

        assert_eq!(features.location, 1.2);
        assert!((features.floors_urban - 3.6).abs() < 1e-12);
    }

    #[test]
    fn test_rural_standard_residential_features() {
        let features = FeatureSet::from_request(&request(
            Location::Rural,
            Quality::Standard,
            ConstructionType::Residential,
        ));

        assert_eq!(features.location_urban, 0.0);
        assert_eq!(features.quality_standard, 1.0);
        assert_eq!(features.quality_premium, 0.0);
        assert_eq!(features.type_residential, 1.0);

        // Urban-gated interactions collapse to zero outside urban sites.
        assert_eq!(features.floors_location_urban, 0.0);
        assert_eq!(features.location_approx_cost, 0.0);
        assert_eq!(features.location_floors, 0.0);
        assert_eq!(features.quality_location_urban, 0.0);

        assert_eq!(features.floors_quality_standard, 3.0);

        assert_eq!(features.location, 1.0);
        assert_eq!(features.floors_urban, 3.0);
    }

    #[test]
    fn test_quality_location_urban_requires_premium() {
        // Standard quality in an urban site: the quality/location cross
        // term stays zero because it is gated on Premium.
        let features = FeatureSet::from_request(&request(
            Location::Urban,
            Quality::Standard,
            ConstructionType::Residential,
        ));
        assert_eq!(features.quality_location_urban, 0.0);
    }

    #[test]
    fn test_alignment_order_fill_and_drop() {
        let features = FeatureSet::from_request(&request(
            Location::Urban,
            Quality::Premium,
            ConstructionType::Commercial,
        ));

        let names: Vec<String> = ["Floors", "SomeUnknownColumn", "Area", "Location"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let aligned = features.aligned(&names);

        assert_eq!(aligned.len(), 4);
        assert_eq!(aligned[0], 3.0);
        // Unknown declared column filled with zero.
        assert_eq!(aligned[1], 0.0);
        assert_eq!(aligned[2], 1200.0);
        assert!((aligned[3] - 1.2).abs() < 1e-6);
    }
}
