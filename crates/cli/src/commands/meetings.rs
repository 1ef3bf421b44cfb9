//! Meeting-related CLI commands

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, Meeting, Notification};
use crate::output::{color_status, print_table, OutputFormat};

/// Row for the meeting table
#[derive(Tabled, serde::Serialize)]
struct MeetingRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Topic")]
    topic: String,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Place")]
    place: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Row for the notification table
#[derive(Tabled, serde::Serialize)]
struct NotificationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Recipient")]
    recipient: String,
    #[tabled(rename = "Meeting")]
    meeting: String,
    #[tabled(rename = "Sent")]
    sent: String,
}

/// List all meetings
pub async fn list(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let meetings: Vec<Meeting> = client.get("meetings").await?;

    let rows: Vec<MeetingRow> = meetings
        .iter()
        .map(|m| MeetingRow {
            id: m.id,
            topic: m.meeting_topic.clone(),
            when: format_timestamp(&m.date_time),
            place: m.place.clone(),
            client: m.client_name.clone(),
            status: color_status(&m.status),
        })
        .collect();

    print_table(&rows, format);
    Ok(())
}

/// List all notifications
pub async fn notifications(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let notifications: Vec<Notification> = client.get("notifications").await?;

    let rows: Vec<NotificationRow> = notifications
        .iter()
        .map(|n| NotificationRow {
            id: n.id,
            kind: n.notification_type.clone(),
            recipient: n.recipient.clone(),
            meeting: format!("{} {}", n.meeting_date, n.meeting_time),
            sent: n.sent_at.clone(),
        })
        .collect();

    print_table(&rows, format);
    Ok(())
}

/// Trim an ISO timestamp down to date and minute
fn format_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S") {
        dt.format("%Y-%m-%d %H:%M").to_string()
    } else {
        ts.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2025-06-01T10:30:00"), "2025-06-01 10:30");
        assert_eq!(format_timestamp("not a date"), "not a date");
    }
}
