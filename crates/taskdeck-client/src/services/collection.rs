//! Shared plumbing for REST collections.

use serde::Serialize;
use serde::de::DeserializeOwned;
use taskdeck_core::models::ListResponse;

use crate::errors::ApiError;
use crate::http::ApiClient;

/// A collection path on one API client.
#[derive(Debug, Clone)]
pub(crate) struct Collection {
    api: ApiClient,
    path: &'static str,
}

impl Collection {
    pub(crate) fn new(api: ApiClient, path: &'static str) -> Self {
        Self { api, path }
    }

    /// `GET {path}{query}`. `query` is appended as-is.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        query: Option<&str>,
    ) -> Result<ListResponse<T>, ApiError> {
        let url = format!("{}{}", self.path, query.unwrap_or_default());
        self.api.get(&url).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, id: &str) -> Result<T, ApiError> {
        self.api.get(&self.member(id)).await
    }

    pub(crate) async fn create<B, T>(&self, data: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.api.post(self.path, data).await
    }

    /// `POST {path}/{sub}`.
    pub(crate) async fn create_at<B, T>(&self, sub: &str, data: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.api.post(&self.member(sub), data).await
    }

    pub(crate) async fn update<B, T>(&self, id: &str, data: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.api.put(&self.member(id), data).await
    }

    pub(crate) async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(&self.member(id)).await
    }

    fn member(&self, id: &str) -> String {
        format!("{}/{id}", self.path)
    }
}
