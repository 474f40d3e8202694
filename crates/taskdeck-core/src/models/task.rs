//! Task records and payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ProjectId, TaskId, UserId};
use crate::models::status::TaskStatus;
use crate::models::user::User;

/// A task as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Status wire string (see [`TaskStatus`]).
    pub status: String,
    /// Priority wire string.
    pub priority: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Assigned user.
    pub assignee_id: UserId,
    /// Due date as sent by the server.
    pub due_date: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Assignee, when the server embeds it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Task {
    /// Typed status, if the server sent a known value.
    pub fn status(&self) -> Option<TaskStatus> {
        TaskStatus::from_wire(&self.status)
    }

    /// Whether the task is completed.
    pub fn is_completed(&self) -> bool {
        self.status() == Some(TaskStatus::Completed)
    }

    /// Parsed due date. Accepts RFC 3339 timestamps and plain `YYYY-MM-DD`
    /// dates (midnight UTC).
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.due_date) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Whether the task is past due at `now` and not yet completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.due_at().is_some_and(|due| due < now)
    }
}

/// Payload for `POST /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Status wire string.
    pub status: String,
    /// Priority wire string.
    pub priority: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Assigned user.
    pub assignee_id: UserId,
    /// Due date (`YYYY-MM-DD`).
    pub due_date: String,
}

/// Partial payload for `PUT /tasks/{id}`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Move to another project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Reassign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    /// New due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(status: &str, due: &str) -> Task {
        Task {
            status: status.into(),
            due_date: due.into(),
            ..Default::default()
        }
    }

    #[test]
    fn embedded_user_is_optional() {
        let t: Task = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "title": "Write docs",
            "user": {"id": "u1", "name": "Ana", "email": "a@x.io", "role": "member"}
        }))
        .unwrap();
        assert_eq!(t.user.unwrap().name, "Ana");

        let t: Task = serde_json::from_value(serde_json::json!({"id": "t2"})).unwrap();
        assert!(t.user.is_none());
    }

    #[test]
    fn due_at_parses_both_formats() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert!(task("todo", "2024-04-30").is_overdue(now));
        assert!(task("todo", "2024-04-30T23:00:00Z").is_overdue(now));
        assert!(!task("todo", "2024-05-02").is_overdue(now));
    }

    #[test]
    fn completed_or_unparseable_is_not_overdue() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert!(!task("completed", "2020-01-01").is_overdue(now));
        assert!(!task("todo", "someday").is_overdue(now));
        assert!(!task("todo", "").is_overdue(now));
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = UpdateTask {
            status: Some("in_progress".into()),
            assignee_id: Some(UserId::from("u9")),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "in_progress", "assignee_id": "u9"})
        );
    }
}
