//! The session object shared by the HTTP client and the auth context.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use taskdeck_core::models::User;

use crate::errors::SessionError;
use crate::storage::{SessionStore, TOKEN_KEY, USER_KEY};

/// An authenticated identity and its bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token.
    pub token: String,
    /// The signed-in user.
    pub user: User,
}

/// Durable session entries plus the in-memory copy.
///
/// Lifecycle: [`hydrate`](Self::hydrate) once at startup, then
/// [`persist`](Self::persist) on login and [`clear`](Self::clear) on logout
/// or when the API rejects the token.
pub struct SessionHandle {
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<Session>>,
}

impl SessionHandle {
    /// Handle over `store`, initially holding no in-memory session.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// Bearer token from durable storage.
    ///
    /// Read on every request so a token written by another handle on the
    /// same store is picked up.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// The in-memory session.
    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    /// Load the session from durable storage into memory.
    ///
    /// Only succeeds when both entries are present and the user entry is
    /// valid JSON; otherwise memory is left empty.
    pub fn hydrate(&self) -> Option<Session> {
        let token = self.token()?;
        let raw_user = self.store.get(USER_KEY)?;
        let user: User = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("stored user is not valid JSON, ignoring session: {e}");
                return None;
            }
        };

        let session = Session { token, user };
        *self.current.write() = Some(session.clone());
        Some(session)
    }

    /// Store `session` in memory and in durable storage.
    ///
    /// Both entries are written together. On error, neither storage nor
    /// memory changes.
    pub fn persist(&self, session: Session) -> Result<(), SessionError> {
        let raw_user = serde_json::to_string(&session.user)?;
        self.store.set_many(&[
            (TOKEN_KEY, session.token.as_str()),
            (USER_KEY, raw_user.as_str()),
        ])?;
        *self.current.write() = Some(session);
        Ok(())
    }

    /// Drop the session from memory and durable storage.
    ///
    /// Memory is cleared even when the store fails.
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.current.write() = None;
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("authenticated", &self.current.read().is_some())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStore;
    use taskdeck_core::models::UserRole;

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role: UserRole::Admin,
            ..Default::default()
        }
    }

    fn handle() -> (Arc<MemorySessionStore>, SessionHandle) {
        let store = Arc::new(MemorySessionStore::new());
        let handle = SessionHandle::new(store.clone());
        (store, handle)
    }

    #[test]
    fn persist_writes_both_entries() {
        let (store, handle) = handle();
        handle
            .persist(Session {
                token: "tok".into(),
                user: user(),
            })
            .unwrap();

        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok"));
        let stored: User = serde_json::from_str(&store.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, user());
        assert_eq!(handle.current().unwrap().token, "tok");
        assert_eq!(handle.token().as_deref(), Some("tok"));
    }

    /// Memory store whose user entry cannot be written.
    struct UserWriteFails(MemorySessionStore);

    impl SessionStore for UserWriteFails {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
            if key == USER_KEY {
                return Err(SessionError::Io(std::io::Error::other("disk full")));
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), SessionError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn failed_persist_keeps_previous_session() {
        let inner = MemorySessionStore::new();
        let old_user = serde_json::to_string(&user()).unwrap();
        inner.set(TOKEN_KEY, "old").unwrap();
        inner.set(USER_KEY, &old_user).unwrap();
        let store = Arc::new(UserWriteFails(inner));
        let handle = SessionHandle::new(store.clone());
        let before = handle.hydrate().unwrap();

        let result = handle.persist(Session {
            token: "new".into(),
            user: User {
                id: "u2".into(),
                ..Default::default()
            },
        });

        assert!(result.is_err());
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("old"));
        assert_eq!(store.get(USER_KEY), Some(old_user));
        assert_eq!(handle.current(), Some(before));
    }

    #[test]
    fn hydrate_requires_both_entries() {
        let (store, handle) = handle();
        store.set(TOKEN_KEY, "tok").unwrap();
        assert!(handle.hydrate().is_none());
        assert!(handle.current().is_none());

        store
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();
        let session = handle.hydrate().unwrap();
        assert_eq!(session.user.name, "Ana");
        assert_eq!(handle.current(), Some(session));
    }

    #[test]
    fn hydrate_rejects_invalid_user_json() {
        let (store, handle) = handle();
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, "{not json").unwrap();
        assert!(handle.hydrate().is_none());
    }

    #[test]
    fn hydrate_without_token_is_none() {
        let (store, handle) = handle();
        store
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();
        assert!(handle.hydrate().is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let (store, handle) = handle();
        handle
            .persist(Session {
                token: "tok".into(),
                user: user(),
            })
            .unwrap();
        handle.clear().unwrap();
        assert!(store.is_empty());
        assert!(handle.current().is_none());
        assert!(handle.token().is_none());
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let (store, handle) = handle();
        store.set(TOKEN_KEY, "").unwrap();
        assert!(handle.token().is_none());
    }
}
