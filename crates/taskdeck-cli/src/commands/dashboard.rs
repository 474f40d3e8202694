//! `dashboard`: summary counts plus the first page of projects.

use anyhow::Result;
use chrono::Utc;
use serde_json::{Value, json};
use taskdeck_client::DashboardSummary;
use taskdeck_client::fetch::{ListParams, ProjectsFetcher, TasksFetcher};

use super::{fetch_page, to_json};
use crate::app::App;

pub async fn run(per_page: u32, app: &App) -> Result<Value> {
    let params = ListParams {
        per_page,
        ..ListParams::from_settings(app.lists())
    };
    let encoding = app.lists().query_encoding;

    let project_list =
        ProjectsFetcher::new(app.projects(), params.clone()).with_encoding(encoding);
    let task_list = TasksFetcher::new(app.tasks(), params).with_encoding(encoding);
    let (projects, tasks) =
        tokio::try_join!(fetch_page(&project_list), fetch_page(&task_list))?;

    let summary = DashboardSummary::compute(&projects.result, &tasks.result, Utc::now());
    let cards: Vec<Value> = projects
        .result
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "status": p.status,
                "progress": p.progress(),
            })
        })
        .collect();

    Ok(json!({
        "summary": to_json(&summary)?,
        "projects": cards,
        "totals": { "projects": projects.total, "tasks": tasks.total },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::app;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn summarizes_projects_and_tasks() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    {"id": "p1", "name": "A", "status": "completed", "tasks_count": 2, "completed_tasks_count": 2},
                    {"id": "p2", "name": "B", "status": "in_progress", "tasks_count": 4, "completed_tasks_count": 1}
                ],
                "total": 2
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    {"id": "t1", "status": "todo", "due_date": "2000-01-01"},
                    {"id": "t2", "status": "completed", "due_date": "2000-01-01"}
                ],
                "total": 2
            })))
            .mount(&server)
            .await;

        let app = app(&server.uri(), dir.path());
        let out = run(50, &app).await.unwrap();

        assert_eq!(out["summary"]["completion_rate"], 50);
        assert_eq!(out["summary"]["active_projects"], 1);
        assert_eq!(out["summary"]["pending_tasks"], 1);
        assert_eq!(out["summary"]["overdue_tasks"], 1);
        assert_eq!(out["projects"][1]["progress"], 25);
        assert_eq!(out["totals"]["tasks"], 2);
    }

    #[tokio::test]
    async fn failed_list_fails_the_command() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [], "total": 0})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "database down"})),
            )
            .mount(&server)
            .await;

        let app = app(&server.uri(), dir.path());
        let err = run(50, &app).await.unwrap_err();
        assert!(err.to_string().contains("database down"));
    }
}
