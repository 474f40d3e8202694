//! `/tasks` endpoints.

use async_trait::async_trait;
use taskdeck_core::TaskId;
use taskdeck_core::models::{CreateTask, ListResponse, Task, UpdateTask};

use super::collection::Collection;
use crate::errors::ApiError;
use crate::fetch::{EntitySource, ListSource};
use crate::http::ApiClient;

/// Task CRUD.
#[derive(Debug, Clone)]
pub struct TasksService {
    tasks: Collection,
}

impl TasksService {
    /// Service on `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            tasks: Collection::new(api, "/tasks"),
        }
    }

    /// One page of tasks. `query` is appended to `/tasks` verbatim.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self, query: Option<&str>) -> Result<ListResponse<Task>, ApiError> {
        self.tasks.list(query).await
    }

    /// A single task.
    #[tracing::instrument(skip(self))]
    pub async fn get_one(&self, id: &TaskId) -> Result<Task, ApiError> {
        self.tasks.get(id.as_str()).await
    }

    /// Create a task.
    #[tracing::instrument(skip_all, fields(title = %data.title, project = %data.project_id))]
    pub async fn create(&self, data: &CreateTask) -> Result<Task, ApiError> {
        self.tasks.create(data).await
    }

    /// Apply a partial update.
    #[tracing::instrument(skip(self, data))]
    pub async fn update(&self, id: &TaskId, data: &UpdateTask) -> Result<Task, ApiError> {
        self.tasks.update(id.as_str(), data).await
    }

    /// Delete a task.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: &TaskId) -> Result<(), ApiError> {
        self.tasks.remove(id.as_str()).await
    }
}

#[async_trait]
impl ListSource for TasksService {
    type Item = Task;

    async fn fetch_list(&self, query: &str) -> Result<ListResponse<Task>, ApiError> {
        self.get_all(Some(query)).await
    }
}

#[async_trait]
impl EntitySource for TasksService {
    type Id = TaskId;
    type Entity = Task;

    async fn fetch_one(&self, id: &TaskId) -> Result<Task, ApiError> {
        self.get_one(id).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
