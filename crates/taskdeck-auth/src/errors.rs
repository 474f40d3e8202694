//! Session error types.

/// Errors that can occur while persisting or clearing a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
