//! Wire models for the taskdeck REST API.
//!
//! Entities are server-authoritative read models. Every field is trusted as
//! the API sends it; missing fields fall back to their defaults rather than
//! failing deserialization.

pub mod auth;
pub mod list;
pub mod project;
pub mod status;
pub mod task;
pub mod user;

pub use auth::{AuthResponse, LoginRequest};
pub use list::ListResponse;
pub use project::{CreateProject, Project, UpdateProject};
pub use status::{Priority, ProjectStatus, TaskStatus};
pub use task::{CreateTask, Task, UpdateTask};
pub use user::{CreateCompanyUser, CreateUser, User, UserRole};
