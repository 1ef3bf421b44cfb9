//! Cost estimation command

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::{ApiClient, EstimateRequest, EstimateResponse};
use crate::output::{format_money, format_percentage, OutputFormat};

/// Row for the breakdown table
#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
}

/// Request an estimate and render the breakdown
pub async fn run(
    client: &ApiClient,
    request: EstimateRequest,
    format: OutputFormat,
) -> Result<()> {
    let result: EstimateResponse = client.post("predict", &request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", "Cost Estimate".bold());
            println!("{}", "=".repeat(50));
            println!(
                "{}  {}",
                "Predicted cost:".bold(),
                format_money(result.predicted_cost).green().bold()
            );
            println!();

            let mut rows: Vec<BreakdownRow> = result
                .contributions
                .iter()
                .map(|(category, contribution)| BreakdownRow {
                    category: category.clone(),
                    share: result
                        .percentage_contributions
                        .get(category)
                        .map(|pct| format_percentage(*pct))
                        .unwrap_or_default(),
                    contribution: format_money(*contribution),
                })
                .collect();
            rows.sort_by(|a, b| a.category.cmp(&b.category));

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }

    Ok(())
}
