//! Authenticated HTTP client for the taskdeck API.
//!
//! Every request reads the bearer token from the session store and attaches
//! it when present. A 401 response ends the session: both stored entries are
//! cleared, the navigator is sent to the login route, and the caller still
//! receives [`ApiError::Unauthorized`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use taskdeck_auth::{LOGIN_ROUTE, Navigator, SessionHandle};
use taskdeck_settings::ApiSettings;

use crate::errors::ApiError;

/// JSON client bound to one API base URL and one session.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<SessionHandle>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Client with transport defaults (no timeout).
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<SessionHandle>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, session, navigator)
    }

    /// Client configured from settings. `timeoutMs` applies to whole requests.
    pub fn from_settings(
        settings: &ApiSettings,
        session: Arc<SessionHandle>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent("taskdeck/0.1");
        if let Some(ms) = settings.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;
        Ok(Self::with_client(
            client,
            settings.base_url.clone(),
            session,
            navigator,
        ))
    }

    fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<SessionHandle>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            session,
            navigator,
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Arc<SessionHandle> {
        &self.session
    }

    /// `GET path` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(self.request(Method::GET, path)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `POST path` with a JSON body and decode the JSON response.
    pub async fn post<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(self.request(Method::POST, path).json(payload))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `PUT path` with a JSON body and decode the JSON response.
    pub async fn put<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(self.request(Method::PUT, path).json(payload))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `DELETE path`. The response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let _ = self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the raw body of a successful response.
    async fn send(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            return Ok(text);
        }

        let message = error_message(&text);
        if status == StatusCode::UNAUTHORIZED {
            self.end_session();
            return Err(ApiError::Unauthorized { message });
        }

        tracing::debug!(status = status.as_u16(), %message, "API request failed");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    fn end_session(&self) {
        tracing::warn!("API rejected the session token, signing out");
        if let Err(e) = self.session.clear() {
            tracing::warn!("failed to clear stored session: {e}");
        }
        self.navigator.navigate(LOGIN_ROUTE);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// The body's `message` field (a string, or a list of strings joined with
/// `", "`), else the raw body.
fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("message")? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        });
    message.unwrap_or_else(|| body.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
