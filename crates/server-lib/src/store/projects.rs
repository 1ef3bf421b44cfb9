//! Project and task persistence

use super::Store;
use crate::error::Result;
use crate::models::{NewProject, NewTask, Project, ProjectStatus, ProjectSummary, Task};
use chrono::NaiveDate;
use sqlx::Row;

impl Store {
    /// Compact listing of all projects, display-formatted.
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        let rows = sqlx::query(
            "SELECT project_id, project_name, location, start_date, end_date FROM projects",
        )
        .fetch_all(self.pool())
        .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            let start_date: Option<NaiveDate> = row.try_get("start_date")?;
            let end_date: Option<NaiveDate> = row.try_get("end_date")?;
            summaries.push(ProjectSummary {
                project_id: row.try_get("project_id")?,
                project_name: title_case(&row.try_get::<String, _>("project_name")?),
                location: capitalize(&row.try_get::<String, _>("location")?),
                start_date: start_date.map(|d| d.format("%Y-%m-%d").to_string()),
                end_date: end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            });
        }
        Ok(summaries)
    }

    /// Full project row; the name is title-cased for display.
    pub async fn project_details(&self, project_id: i64) -> Result<Option<Project>> {
        let project: Option<Project> =
            sqlx::query_as("SELECT * FROM projects WHERE project_id = ?")
                .bind(project_id)
                .fetch_optional(self.pool())
                .await?;

        Ok(project.map(|mut p| {
            p.project_name = title_case(&p.project_name);
            p
        }))
    }

    /// Insert a project and instantiate its tasks from the templates.
    pub async fn add_project(&self, project: &NewProject) -> Result<i64> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO projects (project_name, location, project_type, sponsor, budget, \
             project_area, start_date, end_date) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&project.project_name)
        .bind(&project.location)
        .bind(&project.project_type)
        .bind(&project.sponsor)
        .bind(project.budget)
        .bind(project.project_area)
        .bind(parse_date(project.start_date.as_deref()))
        .bind(parse_date(project.end_date.as_deref()))
        .execute(&mut *tx)
        .await?;
        let project_id = result.last_insert_rowid();

        sqlx::query(
            "INSERT INTO tasks (project_id, task_name, phase) \
             SELECT ?, task_name, phase FROM task_templates",
        )
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(project_id)
    }

    /// Full-row update; returns the updated row or None when unknown.
    pub async fn update_project(
        &self,
        project_id: i64,
        project: &NewProject,
    ) -> Result<Option<Project>> {
        let result = sqlx::query(
            "UPDATE projects SET project_name = ?, location = ?, project_type = ?, sponsor = ?, \
             budget = ?, project_area = ?, start_date = ?, end_date = ? WHERE project_id = ?",
        )
        .bind(&project.project_name)
        .bind(&project.location)
        .bind(&project.project_type)
        .bind(&project.sponsor)
        .bind(project.budget)
        .bind(project.project_area)
        .bind(parse_date(project.start_date.as_deref()))
        .bind(parse_date(project.end_date.as_deref()))
        .bind(project_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.project_details(project_id).await
    }

    /// Delete a project and its tasks. Returns false when unknown.
    pub async fn delete_project(&self, project_id: i64) -> Result<bool> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM tasks WHERE project_id = ?")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM projects WHERE project_id = ?")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn tasks_for_project(&self, project_id: i64) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as("SELECT * FROM tasks WHERE project_id = ?")
            .bind(project_id)
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    /// Task list plus completion summary; None when the project has no
    /// tasks.
    pub async fn project_status(&self, project_id: i64) -> Result<Option<ProjectStatus>> {
        let tasks = self.tasks_for_project(project_id).await?;
        if tasks.is_empty() {
            return Ok(None);
        }

        let completed_tasks = tasks.iter().filter(|t| t.completed).count();
        let total_tasks = tasks.len();
        let completion_percentage =
            ((completed_tasks as f64 / total_tasks as f64) * 100.0 * 100.0).round() / 100.0;

        Ok(Some(ProjectStatus {
            tasks,
            completion_percentage,
            completed_tasks,
            total_tasks,
        }))
    }

    pub async fn add_task(&self, task: &NewTask) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO tasks (project_id, task_name, phase, completed) VALUES (?, ?, ?, ?)",
        )
        .bind(task.project_id)
        .bind(&task.task_name)
        .bind(&task.phase)
        .bind(task.completed)
        .execute(self.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn set_task_completed(&self, task_id: i64, completed: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE tasks SET completed = ? WHERE task_id = ?")
            .bind(completed)
            .bind(task_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = ?")
            .bind(task_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Seed a task template row applied to every new project.
    pub async fn add_task_template(&self, task_name: &str, phase: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO task_templates (task_name, phase) VALUES (?, ?)")
            .bind(task_name)
            .bind(phase)
            .execute(self.pool())
            .await?;
        Ok(result.last_insert_rowid())
    }
}

/// Lenient `YYYY-MM-DD` parse; anything else stores as NULL.
fn parse_date(date: Option<&str>) -> Option<NaiveDate> {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
