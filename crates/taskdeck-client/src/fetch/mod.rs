//! Fetch coordinators: reactive state for list and detail views.
//!
//! A coordinator owns the current request parameters and publishes a
//! snapshot through a `tokio::sync::watch` channel. Every request it issues
//! carries a sequence number; a response is applied only if no newer request
//! was issued after it, so out-of-order completions cannot overwrite fresher
//! data. Superseded requests still run to completion. Dropping a pending
//! fetch future releases its slot, so a later refresh is not blocked.
//!
//! Fetch failures are logged and absorbed into the snapshot's phase. They
//! never surface as `Err`.

pub mod entity;
pub mod list;
pub mod source;

pub use entity::{EntityFetcher, EntitySnapshot};
pub use list::{ListFetcher, ListParams, ListSnapshot};
pub use source::{EntitySource, ListSource};

use crate::services::{ProjectsService, TasksService, UsersService};

/// Lifecycle of the latest request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Success,
    /// The latest request failed with this message.
    Error(String),
}

/// What a call to a coordinator did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A response was applied to the snapshot.
    Applied,
    /// No request was issued.
    Skipped,
    /// A request completed but a newer one had been issued; discarded.
    Stale,
    /// The request failed; the snapshot's phase records the error.
    Failed,
}

/// Project list, as shown on the dashboard.
pub type ProjectsFetcher = ListFetcher<ProjectsService>;
/// Task list, usually filtered by project.
pub type TasksFetcher = ListFetcher<TasksService>;
/// Company user list.
pub type UsersFetcher = ListFetcher<UsersService>;
/// Single project detail.
pub type ProjectFetcher = EntityFetcher<ProjectsService>;
