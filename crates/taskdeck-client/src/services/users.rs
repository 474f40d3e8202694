//! `/users` endpoints.

use async_trait::async_trait;
use taskdeck_core::UserId;
use taskdeck_core::models::{CreateCompanyUser, ListResponse, User};

use super::collection::Collection;
use crate::errors::ApiError;
use crate::fetch::{EntitySource, ListSource};
use crate::http::ApiClient;

/// Company user listing and creation.
#[derive(Debug, Clone)]
pub struct UsersService {
    users: Collection,
}

impl UsersService {
    /// Service on `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            users: Collection::new(api, "/users"),
        }
    }

    /// One page of users. `query` is appended to `/users` verbatim.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self, query: Option<&str>) -> Result<ListResponse<User>, ApiError> {
        self.users.list(query).await
    }

    /// A single user.
    #[tracing::instrument(skip(self))]
    pub async fn get_one(&self, id: &UserId) -> Result<User, ApiError> {
        self.users.get(id.as_str()).await
    }

    /// Add a member to the caller's company.
    #[tracing::instrument(skip_all, fields(email = %data.email))]
    pub async fn create_company_user(&self, data: &CreateCompanyUser) -> Result<User, ApiError> {
        self.users.create_at("company-user", data).await
    }
}

#[async_trait]
impl ListSource for UsersService {
    type Item = User;

    async fn fetch_list(&self, query: &str) -> Result<ListResponse<User>, ApiError> {
        self.get_all(Some(query)).await
    }
}

#[async_trait]
impl EntitySource for UsersService {
    type Id = UserId;
    type Entity = User;

    async fn fetch_one(&self, id: &UserId) -> Result<User, ApiError> {
        self.get_one(id).await
    }
}
