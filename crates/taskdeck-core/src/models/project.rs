//! Project records and payloads.

use serde::{Deserialize, Serialize};

use crate::ids::{ProjectId, UserId};
use crate::models::status::ProjectStatus;

/// A project as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Server-assigned identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Status wire string (see [`ProjectStatus`]).
    pub status: String,
    /// Priority wire string.
    pub priority: String,
    /// Start date as sent by the server.
    pub start_date: String,
    /// End date as sent by the server.
    pub end_date: String,
    /// Owning user.
    pub owner_id: UserId,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Number of tasks in the project.
    pub tasks_count: u32,
    /// Number of completed tasks in the project.
    pub completed_tasks_count: u32,
}

impl Project {
    /// Typed status, if the server sent a known value.
    pub fn status(&self) -> Option<ProjectStatus> {
        ProjectStatus::from_wire(&self.status)
    }

    /// Completed-task progress as a rounded percentage (0 when empty).
    pub fn progress(&self) -> u32 {
        if self.tasks_count == 0 {
            return 0;
        }
        let done = u64::from(self.completed_tasks_count) * 100;
        let total = u64::from(self.tasks_count);
        u32::try_from((done + total / 2) / total).unwrap_or(u32::MAX)
    }
}

/// Payload for `POST /projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProject {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Status wire string.
    pub status: String,
    /// Priority wire string.
    pub priority: String,
    /// Start date (`YYYY-MM-DD`).
    pub start_date: String,
    /// End date (`YYYY-MM-DD`).
    pub end_date: String,
}

/// Partial payload for `PUT /projects/{id}`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// New start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// New end date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
