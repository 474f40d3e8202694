//! # taskdeck-client
//!
//! Client-side data layer for the taskdeck API.
//!
//! - [`ApiClient`]: JSON over HTTP with bearer auth from the shared
//!   [`SessionHandle`](taskdeck_auth::SessionHandle); a 401 ends the session
//! - [`services`]: typed project, task, user, and auth endpoints
//! - [`fetch`]: list and detail coordinators that publish snapshots and
//!   discard out-of-order responses
//! - [`auth_context`]: sign-in state plus login, register, logout
//! - [`dashboard`]: summary counts over loaded projects and tasks

#![deny(unsafe_code)]

pub mod auth_context;
pub mod dashboard;
pub mod errors;
pub mod fetch;
pub mod http;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use auth_context::AuthContext;
pub use dashboard::DashboardSummary;
pub use errors::{ApiError, ClientError, ErrorCategory};
pub use fetch::{FetchOutcome, FetchPhase, ListParams};
pub use http::ApiClient;
pub use services::{AuthService, ProjectsService, TasksService, UsersService};
