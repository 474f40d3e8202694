//! Wiring shared by every command.

use std::sync::Arc;

use anyhow::{Context, Result};
use taskdeck_auth::{FileSessionStore, LOGIN_ROUTE, RecordingNavigator, SessionHandle};
use taskdeck_client::{
    ApiClient, AuthContext, AuthService, ProjectsService, TasksService, UsersService,
};
use taskdeck_settings::{ListSettings, TaskdeckSettings};

/// Session, API client, and auth context built from settings.
pub struct App {
    lists: ListSettings,
    api: ApiClient,
    navigator: Arc<RecordingNavigator>,
    auth: Arc<AuthContext>,
}

impl App {
    /// Open the session file and build the client stack.
    pub fn new(settings: &TaskdeckSettings) -> Result<Self> {
        let session_file = settings.session.resolved_file();
        tracing::debug!(path = %session_file.display(), "using session file");

        let session = Arc::new(SessionHandle::new(Arc::new(FileSessionStore::new(
            session_file,
        ))));
        let navigator = Arc::new(RecordingNavigator::new());
        let api = ApiClient::from_settings(&settings.api, session.clone(), navigator.clone())
            .context("Failed to build HTTP client")?;
        let auth = Arc::new(AuthContext::init(
            AuthService::new(api.clone()),
            session,
            navigator.clone(),
        ));

        Ok(Self {
            lists: settings.lists.clone(),
            api,
            navigator,
            auth,
        })
    }

    /// List defaults from settings.
    pub fn lists(&self) -> &ListSettings {
        &self.lists
    }

    /// The auth context, for installing with `auth_context::scope`.
    pub fn auth(&self) -> Arc<AuthContext> {
        self.auth.clone()
    }

    pub fn projects(&self) -> ProjectsService {
        ProjectsService::new(self.api.clone())
    }

    pub fn tasks(&self) -> TasksService {
        TasksService::new(self.api.clone())
    }

    pub fn users(&self) -> UsersService {
        UsersService::new(self.api.clone())
    }

    /// Whether anything during this run sent the user back to the login
    /// route (logout or a rejected token).
    pub fn session_ended(&self) -> bool {
        self.navigator.last().as_deref() == Some(LOGIN_ROUTE)
    }
}
