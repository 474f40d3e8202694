//! Where the user is sent when a session ends.

use parking_lot::Mutex;

/// Route of the login screen.
pub const LOGIN_ROUTE: &str = "/";

/// Full-navigation seam.
///
/// Called after logout and after the API rejects the stored token. Front
/// ends decide what "navigate" means (re-render a login view, print a hint).
pub trait Navigator: Send + Sync {
    /// Leave the current view and go to `path`.
    fn navigate(&self, path: &str);
}

/// Navigator that only logs the redirect.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path, "navigation requested");
    }
}

/// Navigator that remembers every path it was sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path navigated to, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().clone()
    }

    /// Most recent path.
    pub fn last(&self) -> Option<String> {
        self.visited.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().push(path.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_navigator_keeps_history() {
        let nav = RecordingNavigator::new();
        assert!(nav.last().is_none());
        nav.navigate("/projects");
        nav.navigate(LOGIN_ROUTE);
        assert_eq!(nav.visited(), vec!["/projects", "/"]);
        assert_eq!(nav.last().as_deref(), Some("/"));
    }

    #[test]
    fn log_navigator_does_not_panic() {
        LogNavigator.navigate(LOGIN_ROUTE);
    }
}
