//! Document record persistence
//!
//! Rows hold a role, a display name and a JSON metadata blob carrying
//! the on-disk file path; the files themselves live under the upload
//! directory and are managed by the API layer.

use super::Store;
use crate::error::{BackendError, Result};
use crate::models::DocumentRecord;
use sqlx::Row;
use std::path::Path;

impl Store {
    /// Record an uploaded document; returns the new row id.
    pub async fn add_document(
        &self,
        role: &str,
        document_name: &str,
        metadata: &serde_json::Value,
    ) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO documents (role, document_name, metadata) VALUES (?, ?, ?)")
                .bind(role)
                .bind(document_name)
                .bind(serde_json::to_string(metadata)?)
                .execute(self.pool())
                .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn list_documents(&self) -> Result<Vec<DocumentRecord>> {
        let rows = sqlx::query("SELECT id, document_name, metadata FROM documents")
            .fetch_all(self.pool())
            .await?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            let metadata: String = row.try_get("metadata")?;
            let file_path = file_path_from_metadata(&metadata)?;
            documents.push(DocumentRecord {
                id: row.try_get("id")?,
                document_name: row.try_get("document_name")?,
                file_name: base_name(&file_path),
                file_path,
            });
        }
        Ok(documents)
    }

    /// The stored file path for a document, None when the row is
    /// unknown.
    pub async fn document_path(&self, document_id: i64) -> Result<Option<String>> {
        let row = sqlx::query("SELECT metadata FROM documents WHERE id = ?")
            .bind(document_id)
            .fetch_optional(self.pool())
            .await?;

        match row {
            Some(row) => {
                let metadata: String = row.try_get("metadata")?;
                Ok(Some(file_path_from_metadata(&metadata)?))
            }
            None => Ok(None),
        }
    }

    /// Delete a document row. Returns false when unknown.
    pub async fn delete_document(&self, document_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(document_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn file_path_from_metadata(metadata: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(metadata)?;
    value
        .get("file_path")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| BackendError::Validation("Document metadata lacks file_path".into()))
}

fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_list_delete_document() {
        let store = Store::in_memory().await.unwrap();

        let metadata = json!({"file_path": "/srv/uploads_new/plan.pdf"});
        let id = store
            .add_document("architect", "Floor plan", &metadata)
            .await
            .unwrap();

        let documents = store.list_documents().await.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, id);
        assert_eq!(documents[0].document_name, "Floor plan");
        assert_eq!(documents[0].file_path, "/srv/uploads_new/plan.pdf");
        assert_eq!(documents[0].file_name, "plan.pdf");

        assert_eq!(
            store.document_path(id).await.unwrap().as_deref(),
            Some("/srv/uploads_new/plan.pdf")
        );
        assert!(store.document_path(id + 1).await.unwrap().is_none());

        assert!(store.delete_document(id).await.unwrap());
        assert!(!store.delete_document(id).await.unwrap());
    }

    #[test]
    fn test_metadata_requires_file_path() {
        assert!(file_path_from_metadata(r#"{"other": 1}"#).is_err());
        assert!(file_path_from_metadata("not json").is_err());
    }
}
