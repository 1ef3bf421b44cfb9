//! Document upload, listing, retrieval and deletion

use crate::api::{ApiError, AppState};
use axum::{
    extract::{Multipart, Path as AxumPath, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use server_lib::error::BackendError;
use server_lib::models::DocumentRecord;
use std::path::Path;
use tracing::warn;

/// Strip any directory components from a client-supplied filename.
fn sanitized_file_name(name: &str) -> Result<String, BackendError> {
    let file_name = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty() && n != "." && n != "..");
    file_name.ok_or_else(|| BackendError::Validation("Invalid file name".into()))
}

/// POST /api/upload - multipart form with `role`, `document` and `file`
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut role: Option<String> = None;
    let mut document_name: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BackendError::Validation(e.to_string()))?
    {
        match field.name() {
            Some("role") => {
                role = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| BackendError::Validation(e.to_string()))?,
                );
            }
            Some("document") => {
                document_name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| BackendError::Validation(e.to_string()))?,
                );
            }
            Some("file") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| BackendError::Validation("Missing required fields".into()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| BackendError::Validation(e.to_string()))?;
                file = Some((name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (Some(role), Some(document_name), Some((file_name, bytes))) = (role, document_name, file)
    else {
        return Err(BackendError::Validation("Missing required fields".into()).into());
    };

    let file_name = sanitized_file_name(&file_name)?;
    let file_path = state.uploads_dir.join(&file_name);

    if file_path.exists() {
        return Err(BackendError::Validation("File already exists".into()).into());
    }

    tokio::fs::create_dir_all(&state.uploads_dir).await.map_err(BackendError::from)?;
    tokio::fs::write(&file_path, &bytes).await.map_err(BackendError::from)?;

    let metadata = json!({ "file_path": file_path.to_string_lossy() });
    let document_id = state
        .store
        .add_document(&role, &document_name, &metadata)
        .await?;

    state.metrics.inc_documents_uploaded();
    state.logger.log_upload(document_id, &file_name);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": document_id, "file_name": file_name })),
    ))
}

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentRecord>>, ApiError> {
    let documents = state.store.list_documents().await?;
    Ok(Json(documents))
}

/// DELETE /api/delete/:id - remove the stored file, then the record
pub async fn delete_document(
    State(state): State<AppState>,
    AxumPath(document_id): AxumPath<i64>,
) -> Result<StatusCode, ApiError> {
    let file_path = state
        .store
        .document_path(document_id)
        .await?
        .ok_or_else(|| BackendError::NotFound("Document not found".into()))?;

    if let Err(e) = tokio::fs::remove_file(&file_path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            return Err(BackendError::from(e).into());
        }
        warn!(file_path = %file_path, "Stored file already missing");
    }

    state.store.delete_document(document_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /uploads_new/:filename - serve a stored file
pub async fn serve_file(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<([(&'static str, &'static str); 1], Vec<u8>), ApiError> {
    let file_name = sanitized_file_name(&filename)?;
    let path = state.uploads_dir.join(file_name);

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| BackendError::NotFound("File not found".into()))?;

    Ok(([("content-type", "application/octet-stream")], bytes))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload_document))
        .route("/api/documents", get(list_documents))
        .route("/api/delete/:document_id", delete(delete_document))
        .route("/uploads_new/:filename", get(serve_file))
}
