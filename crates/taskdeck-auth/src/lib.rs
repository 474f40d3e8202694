//! # taskdeck-auth
//!
//! Session state shared by the HTTP client and the auth context.
//!
//! - [`SessionStore`]: durable key/value storage holding the `auth_token` and
//!   `auth_user` entries ([`FileSessionStore`] on disk, [`MemorySessionStore`]
//!   in memory)
//! - [`SessionHandle`]: the explicit session object. It pairs the durable
//!   store with the in-memory session and is injected wherever the session is
//!   read or cleared, instead of living in ambient global state
//! - [`Navigator`]: where "go back to the login screen" is sent when a
//!   session ends
//!
//! The session file lives at `~/.taskdeck/session.json` with 0o600
//! permissions unless configured otherwise.

#![deny(unsafe_code)]

pub mod errors;
pub mod navigator;
pub mod session;
pub mod storage;

pub use errors::SessionError;
pub use navigator::{LOGIN_ROUTE, LogNavigator, Navigator, RecordingNavigator};
pub use session::{Session, SessionHandle};
pub use storage::{FileSessionStore, MemorySessionStore, SessionStore, TOKEN_KEY, USER_KEY};
