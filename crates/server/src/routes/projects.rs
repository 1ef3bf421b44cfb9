//! Project and task endpoints

use crate::api::{ApiError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use server_lib::error::BackendError;
use server_lib::models::{NewProject, NewTask, Project, ProjectStatus, ProjectSummary, Task};

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    project: Option<String>,
}

/// GET /projects_list
pub async fn projects_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectSummary>>, ApiError> {
    let projects = state.store.list_projects().await?;
    Ok(Json(projects))
}

/// GET /project_details?project=<id>
pub async fn project_details(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<Project>, ApiError> {
    let raw = query
        .project
        .ok_or_else(|| BackendError::Validation("Project ID is required".into()))?;
    let project_id: i64 = raw
        .parse()
        .map_err(|_| BackendError::Validation("Project ID must be an integer".into()))?;

    let project = state
        .store
        .project_details(project_id)
        .await?
        .ok_or_else(|| BackendError::NotFound("Project not found".into()))?;
    Ok(Json(project))
}

/// POST /schedule/add_project
pub async fn add_project(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const REQUIRED: &[&str] = &[
        "project_name",
        "location",
        "project_type",
        "sponsor",
        "budget",
        "project_area",
        "start_date",
        "end_date",
    ];
    let object = body
        .as_object()
        .ok_or_else(|| BackendError::Validation("No data provided".into()))?;
    if REQUIRED.iter().any(|field| !object.contains_key(*field)) {
        return Err(BackendError::Validation("Missing required fields".into()).into());
    }

    let project: NewProject =
        serde_json::from_value(body).map_err(|e| BackendError::Validation(e.to_string()))?;
    let project_id = state.store.add_project(&project).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Project and tasks added successfully!",
            "project_id": project_id
        })),
    ))
}

/// PUT /update_project/:id
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    if body.as_object().map_or(true, |o| o.is_empty()) {
        return Err(BackendError::Validation("No data provided".into()).into());
    }
    let project: NewProject =
        serde_json::from_value(body).map_err(|e| BackendError::Validation(e.to_string()))?;

    let updated = state
        .store
        .update_project(project_id, &project)
        .await?
        .ok_or_else(|| BackendError::NotFound("Project not found".into()))?;

    Ok(Json(json!({
        "message": "Project updated successfully!",
        "project": updated
    })))
}

/// DELETE /delete_project/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete_project(project_id).await? {
        return Err(BackendError::NotFound("Project not found".into()).into());
    }
    Ok(Json(json!({ "message": "Project deleted successfully!" })))
}

/// GET /tasks/:project_id
pub async fn project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.tasks_for_project(project_id).await?;
    if tasks.is_empty() {
        return Err(BackendError::NotFound("No tasks found for this project".into()).into());
    }
    Ok(Json(tasks))
}

/// GET /project_status/:project_id
pub async fn project_status(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectStatus>, ApiError> {
    let status = state
        .store
        .project_status(project_id)
        .await?
        .ok_or_else(|| BackendError::NotFound("No tasks found for this project".into()))?;
    Ok(Json(status))
}

/// POST /add_task
pub async fn add_task(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const REQUIRED: &[&str] = &["project_id", "task_name", "phase"];
    let object = body
        .as_object()
        .ok_or_else(|| BackendError::Validation("No data provided".into()))?;
    if REQUIRED.iter().any(|field| !object.contains_key(*field)) {
        return Err(BackendError::Validation("Missing required fields".into()).into());
    }

    let task: NewTask =
        serde_json::from_value(body).map_err(|e| BackendError::Validation(e.to_string()))?;
    let task_id = state.store.add_task(&task).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Task added successfully!",
            "task_id": task_id
        })),
    ))
}

/// PUT /update_task/:task_id
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let completed = body
        .get("completed")
        .and_then(Value::as_bool)
        .ok_or_else(|| BackendError::Validation("Completion status is required".into()))?;

    if !state.store.set_task_completed(task_id, completed).await? {
        return Err(BackendError::NotFound("Task not found".into()).into());
    }
    Ok(Json(json!({ "message": "Task status updated successfully!" })))
}

/// DELETE /delete_task/:task_id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete_task(task_id).await? {
        return Err(BackendError::NotFound("Task not found".into()).into());
    }
    Ok(Json(json!({ "message": "Task deleted successfully!" })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects_list", get(projects_list))
        .route("/project_details", get(project_details))
        .route("/schedule/add_project", post(add_project))
        .route("/update_project/:project_id", put(update_project))
        .route("/delete_project/:project_id", delete(delete_project))
        .route("/tasks/:project_id", get(project_tasks))
        .route("/project_status/:project_id", get(project_status))
        .route("/add_task", post(add_task))
        .route("/update_task/:task_id", put(update_task))
        .route("/delete_task/:task_id", delete(delete_task))
}
