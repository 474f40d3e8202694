//! Headline numbers for the dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;
use taskdeck_core::models::{Project, ProjectStatus, Task};

/// Counts derived from the loaded projects and tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Projects loaded.
    pub total_projects: usize,
    /// Projects in progress.
    pub active_projects: usize,
    /// Completed projects.
    pub completed_projects: usize,
    /// Completed projects as a rounded percentage, 0 with no projects.
    pub completion_rate: u32,
    /// Tasks loaded.
    pub total_tasks: usize,
    /// Tasks not yet completed.
    pub pending_tasks: usize,
    /// Uncompleted tasks whose due date is before `now`.
    pub overdue_tasks: usize,
}

impl DashboardSummary {
    /// Summarize `projects` and `tasks` as of `now`.
    pub fn compute(projects: &[Project], tasks: &[Task], now: DateTime<Utc>) -> Self {
        let with_status =
            |status: ProjectStatus| projects.iter().filter(|p| p.status() == Some(status)).count();
        let completed_projects = with_status(ProjectStatus::Completed);

        Self {
            total_projects: projects.len(),
            active_projects: with_status(ProjectStatus::InProgress),
            completed_projects,
            completion_rate: percent(completed_projects, projects.len()),
            total_tasks: tasks.len(),
            pending_tasks: tasks.iter().filter(|t| !t.is_completed()).count(),
            overdue_tasks: tasks.iter().filter(|t| t.is_overdue(now)).count(),
        }
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 100 + total / 2) / total;
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
