//! Meeting and notification persistence

use super::Store;
use crate::error::Result;
use crate::models::{Meeting, NewMeeting, NotificationView};
use chrono::{NaiveDateTime, Utc};
use sqlx::Row;

impl Store {
    /// Schedule a meeting and create its reminder notification.
    pub async fn create_meeting(&self, meeting: &NewMeeting) -> Result<i64> {
        let date_time = meeting.parsed_date_time()?;

        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO meetings (meeting_topic, place, location, date_time, client_name, \
             status, agenda, notes) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&meeting.meeting_topic)
        .bind(&meeting.place)
        .bind(&meeting.location)
        .bind(date_time)
        .bind(&meeting.client_name)
        .bind(meeting.status.as_deref().unwrap_or("Scheduled"))
        .bind(&meeting.agenda)
        .bind(meeting.notes.as_deref().unwrap_or(""))
        .execute(&mut *tx)
        .await?;
        let meeting_id = result.last_insert_rowid();

        let message = format!(
            "Reminder: {} is scheduled at {}.",
            meeting.meeting_topic, meeting.place
        );
        sqlx::query(
            "INSERT INTO notifications (meeting_id, notification_type, recipient, message, \
             sent_at, status) VALUES (?, 'Reminder', ?, ?, ?, 'Sent')",
        )
        .bind(meeting_id)
        .bind(&meeting.client_name)
        .bind(&message)
        .bind(Utc::now().naive_utc())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(meeting_id)
    }

    pub async fn list_meetings(&self) -> Result<Vec<Meeting>> {
        let meetings = sqlx::query_as("SELECT * FROM meetings")
            .fetch_all(self.pool())
            .await?;
        Ok(meetings)
    }

    pub async fn get_meeting(&self, meeting_id: i64) -> Result<Option<Meeting>> {
        let meeting = sqlx::query_as("SELECT * FROM meetings WHERE id = ?")
            .bind(meeting_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(meeting)
    }

    /// Update a meeting. Absent status keeps the stored one; absent
    /// notes reset to empty. Returns false when unknown.
    pub async fn update_meeting(&self, meeting_id: i64, meeting: &NewMeeting) -> Result<bool> {
        let Some(existing) = self.get_meeting(meeting_id).await? else {
            return Ok(false);
        };
        let date_time = meeting.parsed_date_time()?;

        sqlx::query(
            "UPDATE meetings SET meeting_topic = ?, place = ?, location = ?, date_time = ?, \
             client_name = ?, status = ?, agenda = ?, notes = ? WHERE id = ?",
        )
        .bind(&meeting.meeting_topic)
        .bind(&meeting.place)
        .bind(&meeting.location)
        .bind(date_time)
        .bind(&meeting.client_name)
        .bind(meeting.status.as_deref().unwrap_or(&existing.status))
        .bind(&meeting.agenda)
        .bind(meeting.notes.as_deref().unwrap_or(""))
        .bind(meeting_id)
        .execute(self.pool())
        .await?;
        Ok(true)
    }

    /// Delete a meeting and its notifications. Returns false when
    /// unknown.
    pub async fn delete_meeting(&self, meeting_id: i64) -> Result<bool> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM notifications WHERE meeting_id = ?")
            .bind(meeting_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM meetings WHERE id = ?")
            .bind(meeting_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Notifications joined with their meeting's schedule, formatted
    /// for display.
    pub async fn list_notifications(&self) -> Result<Vec<NotificationView>> {
        let rows = sqlx::query(
            "SELECT n.id, n.notification_type, n.recipient, n.message, n.sent_at, n.status, \
             m.date_time FROM notifications n JOIN meetings m ON m.id = n.meeting_id",
        )
        .fetch_all(self.pool())
        .await?;

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let sent_at: NaiveDateTime = row.try_get("sent_at")?;
            let meeting_time: NaiveDateTime = row.try_get("date_time")?;
            views.push(NotificationView {
                id: row.try_get("id")?,
                notification_type: row.try_get("notification_type")?,
                recipient: row.try_get("recipient")?,
                message: row.try_get("message")?,
                sent_at: sent_at.format("%Y-%m-%d %H:%M").to_string(),
                status: row.try_get("status")?,
                meeting_date: meeting_time.format("%Y-%m-%d").to_string(),
                meeting_time: meeting_time.format("%H:%M").to_string(),
            });
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;

    fn sample_meeting() -> NewMeeting {
        NewMeeting {
            meeting_topic: "Design review".into(),
            place: "Site office".into(),
            location: "Pune".into(),
            date_time: "2025-06-01T10:30".into(),
            client_name: "Acme Builders".into(),
            status: None,
            agenda: "Review structural drawings".into(),
            notes: Some("Bring revised plans".into()),
        }
    }

    #[tokio::test]
    async fn test_create_meeting_creates_notification() {
        let store = Store::in_memory().await.unwrap();
        let id = store.create_meeting(&sample_meeting()).await.unwrap();

        let meetings = store.list_meetings().await.unwrap();
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].id, id);
        assert_eq!(meetings[0].status, "Scheduled");

        let notifications = store.list_notifications().await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].notification_type, "Reminder");
        assert_eq!(notifications[0].recipient, "Acme Builders");
        assert_eq!(
            notifications[0].message,
            "Reminder: Design review is scheduled at Site office."
        );
        assert_eq!(notifications[0].meeting_date, "2025-06-01");
        assert_eq!(notifications[0].meeting_time, "10:30");
    }

    #[tokio::test]
    async fn test_bad_date_format_rejected() {
        let store = Store::in_memory().await.unwrap();
        let mut meeting = sample_meeting();
        meeting.date_time = "June 1st, 10am".into();

        let err = store.create_meeting(&meeting).await.unwrap_err();
        assert!(matches!(err, BackendError::Validation(_)));
        assert!(err.to_string().contains("YYYY-MM-DDTHH:MM"));
    }

    #[tokio::test]
    async fn test_update_meeting_keeps_status_when_absent() {
        let store = Store::in_memory().await.unwrap();
        let mut meeting = sample_meeting();
        meeting.status = Some("Confirmed".into());
        let id = store.create_meeting(&meeting).await.unwrap();

        let mut update = sample_meeting();
        update.status = None;
        update.agenda = "Final agenda".into();
        assert!(store.update_meeting(id, &update).await.unwrap());

        let updated = store.get_meeting(id).await.unwrap().unwrap();
        assert_eq!(updated.status, "Confirmed");
        assert_eq!(updated.agenda, "Final agenda");
        // Absent notes reset to empty on update.
        assert_eq!(updated.notes, "");
    }

    #[tokio::test]
    async fn test_update_unknown_meeting() {
        let store = Store::in_memory().await.unwrap();
        assert!(!store.update_meeting(42, &sample_meeting()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_meeting_removes_notifications() {
        let store = Store::in_memory().await.unwrap();
        let id = store.create_meeting(&sample_meeting()).await.unwrap();

        assert!(store.delete_meeting(id).await.unwrap());
        assert!(!store.delete_meeting(id).await.unwrap());
        assert!(store.list_notifications().await.unwrap().is_empty());
    }
}
