//! Chatbot command

use anyhow::Result;
use colored::Colorize;

use crate::client::{ApiClient, ChatReply, ChatRequest};
use crate::output::OutputFormat;

/// Send a single query to the FAQ chatbot
pub async fn run(client: &ApiClient, query: String, format: OutputFormat) -> Result<()> {
    let reply: ChatReply = client.post("chat", &ChatRequest { query }).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        OutputFormat::Table => {
            println!("{} {}", "Bot:".cyan().bold(), reply.response);
        }
    }

    Ok(())
}
