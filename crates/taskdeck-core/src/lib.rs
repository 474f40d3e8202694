//! # taskdeck-core
//!
//! Shared vocabulary for the taskdeck client crates:
//!
//! - **Branded IDs**: `ProjectId`, `TaskId`, `UserId` as newtypes so a task ID
//!   cannot be passed where a project ID is expected
//! - **Models**: server-owned `Project`, `Task`, `User` records, their create
//!   and partial-update payloads, and the list/auth response envelopes
//! - **Query**: filter criteria, orderers and pagination serialized into the
//!   query string the API expects
//! - **Logging**: `tracing` subscriber setup and a capture helper for tests

#![deny(unsafe_code)]

pub mod ids;
pub mod logging;
pub mod models;
pub mod query;

pub use ids::{ProjectId, TaskId, UserId};
pub use query::{
    FilterCriterion, FilterOperator, ListQuery, Orderers, QueryEncoding, QueryError,
    SortDirection, serialize,
};
