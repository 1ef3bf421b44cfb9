//! Construction Management CLI
//!
//! A command-line tool for requesting cost estimates, chatting with the
//! FAQ bot, and browsing projects and meetings on the backend.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::EstimateRequest;
use commands::{chat, estimate, meetings, projects};

/// Construction Management CLI
#[derive(Parser)]
#[command(name = "cmt")]
#[command(author, version, about = "CLI for the Construction Management backend", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via CMT_API_URL env var)
    #[arg(long, env = "CMT_API_URL", default_value = "http://localhost:5000")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Request a construction cost estimate
    Estimate {
        /// Built-up area in square feet
        #[arg(long)]
        area: f64,

        /// Number of floors
        #[arg(long)]
        floors: u32,

        /// Site location (Urban or Rural)
        #[arg(long)]
        location: String,

        /// Finish quality (Basic, Standard or Premium)
        #[arg(long)]
        quality: String,

        /// Construction type (Residential, Commercial or Industrial)
        #[arg(long)]
        construction_type: String,

        /// Client's approximate budget
        #[arg(long)]
        approx_cost: f64,
    },

    /// Ask the FAQ chatbot a question
    Chat {
        /// The question to ask
        query: String,
    },

    /// Browse projects
    #[command(subcommand)]
    Projects(ProjectCommands),

    /// Browse meetings and notifications
    #[command(subcommand)]
    Meetings(MeetingCommands),
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects
    List,

    /// Show a project's tasks
    Tasks {
        /// Project ID
        project_id: i64,
    },

    /// Show a project's completion status
    Status {
        /// Project ID
        project_id: i64,
    },
}

#[derive(Subcommand)]
pub enum MeetingCommands {
    /// List all meetings
    List,

    /// List all notifications
    Notifications,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize client
    let client = client::ApiClient::new(&cli.api_url)?;

    // Execute command
    match cli.command {
        Commands::Estimate {
            area,
            floors,
            location,
            quality,
            construction_type,
            approx_cost,
        } => {
            let request = EstimateRequest {
                area,
                floors,
                location,
                quality,
                construction_type,
                approx_cost,
            };
            estimate::run(&client, request, cli.format).await?;
        }
        Commands::Chat { query } => {
            chat::run(&client, query, cli.format).await?;
        }
        Commands::Projects(project_cmd) => match project_cmd {
            ProjectCommands::List => {
                projects::list(&client, cli.format).await?;
            }
            ProjectCommands::Tasks { project_id } => {
                projects::tasks(&client, project_id, cli.format).await?;
            }
            ProjectCommands::Status { project_id } => {
                projects::status(&client, project_id, cli.format).await?;
            }
        },
        Commands::Meetings(meeting_cmd) => match meeting_cmd {
            MeetingCommands::List => {
                meetings::list(&client, cli.format).await?;
            }
            MeetingCommands::Notifications => {
                meetings::notifications(&client, cli.format).await?;
            }
        },
    }

    Ok(())
}
