//! SQLite persistence for projects, tasks, meetings, notifications and
//! document records
//!
//! The schema is created on startup; there is no migration tooling.

mod documents;
mod meetings;
mod projects;

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS projects (
        project_id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_name TEXT NOT NULL,
        location TEXT NOT NULL,
        project_type TEXT NOT NULL,
        sponsor TEXT NOT NULL,
        budget REAL NOT NULL,
        project_area REAL NOT NULL,
        start_date TEXT,
        end_date TEXT
    )",
    "CREATE TABLE IF NOT EXISTS tasks (
        task_id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL REFERENCES projects(project_id),
        task_name TEXT NOT NULL,
        phase TEXT NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS task_templates (
        template_id INTEGER PRIMARY KEY AUTOINCREMENT,
        task_name TEXT NOT NULL,
        phase TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS meetings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        meeting_topic TEXT NOT NULL,
        place TEXT NOT NULL,
        location TEXT NOT NULL,
        date_time TEXT NOT NULL,
        client_name TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Scheduled',
        agenda TEXT NOT NULL,
        notes TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS notifications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        meeting_id INTEGER NOT NULL REFERENCES meetings(id),
        notification_type TEXT NOT NULL,
        recipient TEXT NOT NULL,
        message TEXT NOT NULL,
        sent_at TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Sent'
    )",
    "CREATE TABLE IF NOT EXISTS documents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        role TEXT NOT NULL,
        document_name TEXT NOT NULL,
        metadata TEXT NOT NULL
    )",
];

/// SQLite-backed store
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Connect to the database, creating the file when missing.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!(url = %database_url, "Connecting to SQLite database");

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePool::connect_with(options).await?;
        Ok(Self { pool })
    }

    /// In-memory store for tests. A single connection keeps every query
    /// on the same ephemeral database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create all tables when they do not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Cheap connectivity probe for health reporting.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_initializes() {
        let store = Store::in_memory().await.unwrap();
        store.ping().await.unwrap();
        // Re-running is a no-op thanks to IF NOT EXISTS.
        store.init_schema().await.unwrap();
    }
}
