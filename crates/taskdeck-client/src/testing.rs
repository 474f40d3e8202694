//! Shared fixtures for this crate's tests.

use std::sync::Arc;

use taskdeck_auth::{MemorySessionStore, RecordingNavigator, Session, SessionHandle};
use taskdeck_core::models::User;
use wiremock::MockServer;

use crate::http::ApiClient;

pub(crate) struct TestApi {
    pub store: Arc<MemorySessionStore>,
    pub session: Arc<SessionHandle>,
    pub navigator: Arc<RecordingNavigator>,
    pub client: ApiClient,
}

/// Client pointed at `server` with an empty in-memory session.
pub(crate) fn test_api(server: &MockServer) -> TestApi {
    let store = Arc::new(MemorySessionStore::new());
    let session = Arc::new(SessionHandle::new(store.clone()));
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::new(server.uri(), session.clone(), navigator.clone());
    TestApi {
        store,
        session,
        navigator,
        client,
    }
}

pub(crate) fn user_json(id: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "Ana",
        "email": "ana@example.com",
        "role": role,
    })
}

pub(crate) fn signed_in(api: &TestApi, token: &str) {
    api.session
        .persist(Session {
            token: token.to_string(),
            user: User {
                id: "u1".into(),
                ..Default::default()
            },
        })
        .unwrap();
}
