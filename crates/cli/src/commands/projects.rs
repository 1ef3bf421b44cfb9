//! Project-related CLI commands

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::{ApiClient, ProjectStatusResponse, ProjectSummary, Task};
use crate::output::{format_percentage, print_table, OutputFormat};

/// Row for the project listing table
#[derive(Tabled, serde::Serialize)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
}

/// Row for the task table
#[derive(Tabled, serde::Serialize)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Task")]
    task: String,
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Done")]
    done: String,
}

fn task_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.task_id,
        task: task.task_name.clone(),
        phase: task.phase.clone(),
        done: if task.completed { "✓".to_string() } else { "-".to_string() },
    }
}

/// List all projects
pub async fn list(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let projects: Vec<ProjectSummary> = client.get("projects_list").await?;

    let rows: Vec<ProjectRow> = projects
        .iter()
        .map(|p| ProjectRow {
            id: p.project_id,
            name: p.project_name.clone(),
            location: p.location.clone(),
            start: p.start_date.clone().unwrap_or_default(),
            end: p.end_date.clone().unwrap_or_default(),
        })
        .collect();

    print_table(&rows, format);
    Ok(())
}

/// Show a project's tasks
pub async fn tasks(client: &ApiClient, project_id: i64, format: OutputFormat) -> Result<()> {
    let tasks: Vec<Task> = client.get(&format!("tasks/{}", project_id)).await?;
    let rows: Vec<TaskRow> = tasks.iter().map(task_row).collect();
    print_table(&rows, format);
    Ok(())
}

/// Show a project's completion status
pub async fn status(client: &ApiClient, project_id: i64, format: OutputFormat) -> Result<()> {
    let status: ProjectStatusResponse =
        client.get(&format!("project_status/{}", project_id)).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Table => {
            println!("{}", "Project Status".bold());
            println!("{}", "=".repeat(50));
            println!(
                "Completed:              {} of {} ({})",
                status.completed_tasks,
                status.total_tasks,
                format_percentage(status.completion_percentage).green()
            );
            println!();

            let rows: Vec<TaskRow> = status.tasks.iter().map(task_row).collect();
            print_table(&rows, OutputFormat::Table);
        }
    }

    Ok(())
}
