//! `/projects` endpoints.

use async_trait::async_trait;
use taskdeck_core::ProjectId;
use taskdeck_core::models::{CreateProject, ListResponse, Project, UpdateProject};

use super::collection::Collection;
use crate::errors::ApiError;
use crate::fetch::{EntitySource, ListSource};
use crate::http::ApiClient;

/// Project CRUD.
#[derive(Debug, Clone)]
pub struct ProjectsService {
    projects: Collection,
}

impl ProjectsService {
    /// Service on `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            projects: Collection::new(api, "/projects"),
        }
    }

    /// One page of projects. `query` is appended to `/projects` verbatim.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self, query: Option<&str>) -> Result<ListResponse<Project>, ApiError> {
        self.projects.list(query).await
    }

    /// A single project.
    #[tracing::instrument(skip(self))]
    pub async fn get_one(&self, id: &ProjectId) -> Result<Project, ApiError> {
        self.projects.get(id.as_str()).await
    }

    /// Create a project owned by the caller.
    #[tracing::instrument(skip_all, fields(name = %data.name))]
    pub async fn create(&self, data: &CreateProject) -> Result<Project, ApiError> {
        self.projects.create(data).await
    }

    /// Apply a partial update.
    #[tracing::instrument(skip(self, data))]
    pub async fn update(&self, id: &ProjectId, data: &UpdateProject) -> Result<Project, ApiError> {
        self.projects.update(id.as_str(), data).await
    }

    /// Delete a project.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: &ProjectId) -> Result<(), ApiError> {
        self.projects.remove(id.as_str()).await
    }
}

#[async_trait]
impl ListSource for ProjectsService {
    type Item = Project;

    async fn fetch_list(&self, query: &str) -> Result<ListResponse<Project>, ApiError> {
        self.get_all(Some(query)).await
    }
}

#[async_trait]
impl EntitySource for ProjectsService {
    type Id = ProjectId;
    type Entity = Project;

    async fn fetch_one(&self, id: &ProjectId) -> Result<Project, ApiError> {
        self.get_one(id).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
