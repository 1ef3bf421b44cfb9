//! Meeting and notification endpoints

use crate::api::{ApiError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use server_lib::error::BackendError;
use server_lib::models::{Meeting, NewMeeting, NotificationView};

fn parse_meeting(body: Value) -> Result<NewMeeting, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| BackendError::Validation(e.to_string()).into())
}

/// POST /meetings - schedule a meeting and its reminder notification
pub async fn create_meeting(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let meeting = parse_meeting(body)?;
    state.store.create_meeting(&meeting).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Meeting Scheduled & Notification Created" })),
    ))
}

/// GET /meetings
pub async fn list_meetings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Meeting>>, ApiError> {
    let meetings = state.store.list_meetings().await?;
    Ok(Json(meetings))
}

/// PUT /meetings/:id
pub async fn update_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let meeting = parse_meeting(body)?;

    if !state.store.update_meeting(meeting_id, &meeting).await? {
        return Err(BackendError::NotFound("Meeting not found".into()).into());
    }
    Ok(Json(json!({ "message": "Meeting updated successfully" })))
}

/// DELETE /meetings/:id
pub async fn delete_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete_meeting(meeting_id).await? {
        return Err(BackendError::NotFound("Meeting not found".into()).into());
    }
    Ok(Json(json!({ "message": "Meeting deleted successfully" })))
}

/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationView>>, ApiError> {
    let notifications = state.store.list_notifications().await?;
    Ok(Json(notifications))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meetings", post(create_meeting).get(list_meetings))
        .route("/meetings/:meeting_id", put(update_meeting).delete(delete_meeting))
        .route("/notifications", get(list_notifications))
}
