//! Data sources the fetch coordinators pull from.
//!
//! The resource services implement these; tests substitute scripted fakes.

use async_trait::async_trait;
use taskdeck_core::models::ListResponse;

use crate::errors::ApiError;

/// A paginated collection.
#[async_trait]
pub trait ListSource: Send + Sync {
    /// Element type of the collection.
    type Item: Clone + Send + Sync + 'static;

    /// Fetch one page. `query` is a serialized query string, possibly empty.
    async fn fetch_list(&self, query: &str) -> Result<ListResponse<Self::Item>, ApiError>;
}

/// Single entities addressed by ID.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Identifier type. An empty ID means "nothing selected".
    type Id: AsRef<str> + Clone + PartialEq + Send + Sync + 'static;
    /// Entity type.
    type Entity: Clone + Send + Sync + 'static;

    /// Fetch the entity with `id`.
    async fn fetch_one(&self, id: &Self::Id) -> Result<Self::Entity, ApiError>;
}
