//! Typed wrappers over the API's resource endpoints.
//!
//! | Service | Collection | Extra |
//! |---|---|---|
//! | [`ProjectsService`] | `/projects` | full CRUD |
//! | [`TasksService`] | `/tasks` | full CRUD |
//! | [`UsersService`] | `/users` | `POST /users/company-user` |
//! | [`AuthService`] | `/auth` | login, register |
//!
//! List calls append the query string verbatim; build it with
//! [`ListQuery`](taskdeck_core::ListQuery).

mod collection;

pub mod auth;
pub mod projects;
pub mod tasks;
pub mod users;

pub use auth::AuthService;
pub use projects::ProjectsService;
pub use tasks::TasksService;
pub use users::UsersService;
