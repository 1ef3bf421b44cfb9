//! Core data models for the construction-management backend

use crate::error::{BackendError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Site location category for a cost estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Urban,
    Rural,
}

impl Location {
    /// Urban sites carry a 1.2x cost multiplier, everything else 1.0.
    pub fn multiplier(&self) -> f64 {
        match self {
            Location::Urban => 1.2,
            Location::Rural => 1.0,
        }
    }

    pub fn is_urban(&self) -> bool {
        matches!(self, Location::Urban)
    }
}

/// Finish quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    Basic,
    Standard,
    Premium,
}

/// Construction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionType {
    Residential,
    Commercial,
    Industrial,
}

impl ConstructionType {
    /// Post-prediction cost multiplier per construction type.
    pub fn multiplier(&self) -> f64 {
        match self {
            ConstructionType::Residential => 1.0,
            ConstructionType::Commercial => 1.5,
            ConstructionType::Industrial => 1.25,
        }
    }
}

/// Cost estimation request payload
///
/// All six fields are required; absence of any is a validation error,
/// never a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimateRequest {
    pub area: f64,
    pub floors: u32,
    pub location: Location,
    pub quality: Quality,
    pub construction_type: ConstructionType,
    pub approx_cost: f64,
}

/// The six JSON keys a cost estimate request must carry, in wire order.
pub const REQUIRED_ESTIMATE_FIELDS: &[&str] = &[
    "area",
    "floors",
    "location",
    "quality",
    "construction_type",
    "approx_cost",
];

impl CostEstimateRequest {
    /// Parse a raw JSON object, reporting the first missing key by name.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| BackendError::Validation("Request body must be a JSON object".into()))?;

        for key in REQUIRED_ESTIMATE_FIELDS {
            if !object.contains_key(*key) {
                return Err(BackendError::MissingField((*key).to_string()));
            }
        }

        let request: CostEstimateRequest = serde_json::from_value(value.clone())
            .map_err(|e| BackendError::Validation(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Numeric fields must be positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.area > 0.0) {
            return Err(BackendError::Validation("area must be positive".into()));
        }
        if self.floors == 0 {
            return Err(BackendError::Validation("floors must be positive".into()));
        }
        if !(self.approx_cost > 0.0) {
            return Err(BackendError::Validation(
                "approx_cost must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Final cost estimate with its per-category breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub predicted_cost: f64,
    pub contributions: BTreeMap<String, f64>,
    pub percentage_contributions: BTreeMap<String, f64>,
}

/// Chat request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,
}

/// Chat response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Project row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub project_id: i64,
    pub project_name: String,
    pub location: String,
    pub project_type: String,
    pub sponsor: String,
    pub budget: f64,
    pub project_area: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Compact project listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: i64,
    pub project_name: String,
    pub location: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Fields accepted when creating or updating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub project_name: String,
    pub location: String,
    pub project_type: String,
    pub sponsor: String,
    pub budget: f64,
    pub project_area: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Task row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub task_id: i64,
    pub project_id: i64,
    pub task_name: String,
    pub phase: String,
    pub completed: bool,
}

/// Fields accepted when creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub project_id: i64,
    pub task_name: String,
    pub phase: String,
    #[serde(default)]
    pub completed: bool,
}

/// Per-project completion status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStatus {
    pub tasks: Vec<Task>,
    pub completion_percentage: f64,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

/// Meeting row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Meeting {
    pub id: i64,
    pub meeting_topic: String,
    pub place: String,
    pub location: String,
    pub date_time: NaiveDateTime,
    pub client_name: String,
    pub status: String,
    pub agenda: String,
    pub notes: String,
}

/// Fields accepted when scheduling or updating a meeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMeeting {
    pub meeting_topic: String,
    pub place: String,
    pub location: String,
    /// Wire format "%Y-%m-%dT%H:%M"
    pub date_time: String,
    pub client_name: String,
    pub status: Option<String>,
    pub agenda: String,
    pub notes: Option<String>,
}

/// Accepted wire format for meeting timestamps.
pub const MEETING_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

impl NewMeeting {
    /// Parse the wire timestamp, rejecting anything outside the fixed format.
    pub fn parsed_date_time(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date_time, MEETING_DATETIME_FORMAT).map_err(|_| {
            BackendError::Validation("Invalid date format. Please use 'YYYY-MM-DDTHH:MM'".into())
        })
    }
}

/// Notification joined with its meeting's schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: i64,
    pub notification_type: String,
    pub recipient: String,
    pub message: String,
    pub sent_at: String,
    pub status: String,
    pub meeting_date: String,
    pub meeting_time: String,
}

/// Stored document entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: i64,
    pub document_name: String,
    pub file_path: String,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> serde_json::Value {
        json!({
            "area": 1200.0,
            "floors": 2,
            "location": "Urban",
            "quality": "Premium",
            "construction_type": "Commercial",
            "approx_cost": 500000.0
        })
    }

    #[test]
    fn test_parse_valid_request() {
        let request = CostEstimateRequest::from_json(&valid_body()).unwrap();
        assert_eq!(request.floors, 2);
        assert_eq!(request.location, Location::Urban);
        assert_eq!(request.quality, Quality::Premium);
        assert_eq!(request.construction_type, ConstructionType::Commercial);
    }

    #[test]
    fn test_missing_field_named() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("quality");

        let err = CostEstimateRequest::from_json(&body).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: quality");
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        for key in REQUIRED_ESTIMATE_FIELDS {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(*key);

            let err = CostEstimateRequest::from_json(&body).unwrap_err();
            assert_eq!(err.to_string(), format!("Missing required field: {}", key));
        }
    }

    #[test]
    fn test_unknown_quality_rejected() {
        let mut body = valid_body();
        body["quality"] = json!("Luxury");

        let err = CostEstimateRequest::from_json(&body).unwrap_err();
        assert!(matches!(err, BackendError::Validation(_)));
        assert!(err.to_string().contains("Luxury"));
    }

    #[test]
    fn test_non_positive_area_rejected() {
        let mut body = valid_body();
        body["area"] = json!(0.0);

        let err = CostEstimateRequest::from_json(&body).unwrap_err();
        assert!(err.to_string().contains("area"));
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(ConstructionType::Residential.multiplier(), 1.0);
        assert_eq!(ConstructionType::Commercial.multiplier(), 1.5);
        assert_eq!(ConstructionType::Industrial.multiplier(), 1.25);
        assert_eq!(Location::Urban.multiplier(), 1.2);
        assert_eq!(Location::Rural.multiplier(), 1.0);
    }

    #[test]
    fn test_meeting_datetime_format() {
        let meeting = NewMeeting {
            meeting_topic: "Kickoff".into(),
            place: "Site office".into(),
            location: "Pune".into(),
            date_time: "2025-06-01T10:30".into(),
            client_name: "Acme Builders".into(),
            status: None,
            agenda: "Scope review".into(),
            notes: None,
        };
        assert!(meeting.parsed_date_time().is_ok());

        let bad = NewMeeting {
            date_time: "01-06-2025 10:30".into(),
            ..meeting
        };
        let err = bad.parsed_date_time().unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DDTHH:MM"));
    }
}
