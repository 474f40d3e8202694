//! Client error types.

use taskdeck_auth::SessionError;

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failure or timeout; no response was received.
    Network,
    /// The server rejected the bearer token (401).
    Auth,
    /// Any other 4xx.
    Validation,
    /// 5xx.
    Server,
    /// The response body did not deserialize.
    Parse,
}

impl ErrorCategory {
    /// Lowercase name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::Validation => "validation",
            Self::Server => "server",
            Self::Parse => "parse",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`ApiClient`](crate::http::ApiClient) and the services.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered 401. The session has already been cleared.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Error description from the response body.
        message: String,
    },

    /// The server answered with a non-success status other than 401.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error description from the response body.
        message: String,
    },
}

impl ApiError {
    /// Classify the failure.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(e) if e.is_decode() => ErrorCategory::Parse,
            Self::Http(_) => ErrorCategory::Network,
            Self::Json(_) => ErrorCategory::Parse,
            Self::Unauthorized { .. } => ErrorCategory::Auth,
            Self::Status { status, .. } if *status >= 500 => ErrorCategory::Server,
            Self::Status { .. } => ErrorCategory::Validation,
        }
    }

    /// Whether the server rejected the token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) => None,
        }
    }
}

/// Errors from the auth context and other session-aware operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// [`current`](crate::auth_context::current) was called outside an auth scope.
    #[error("auth context used outside of an auth scope")]
    OutsideAuthScope,

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session could not be persisted or cleared.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
