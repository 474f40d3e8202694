//! Who is signed in, and the operations that change it.
//!
//! [`AuthContext`] wraps the [`AuthService`] and the shared
//! [`SessionHandle`]. Front ends install one per task tree with [`scope`]
//! and read it back with [`current`]; reading it anywhere else is an error.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use taskdeck_auth::{LOGIN_ROUTE, Navigator, Session, SessionHandle};
use taskdeck_core::models::{AuthResponse, CreateUser, LoginRequest, User};

use crate::errors::ClientError;
use crate::services::AuthService;

tokio::task_local! {
    static CURRENT: Arc<AuthContext>;
}

/// Run `fut` with `ctx` as the ambient auth context.
pub async fn scope<F: Future>(ctx: Arc<AuthContext>, fut: F) -> F::Output {
    CURRENT.scope(ctx, fut).await
}

/// The auth context of the enclosing [`scope`].
pub fn current() -> Result<Arc<AuthContext>, ClientError> {
    CURRENT
        .try_with(Arc::clone)
        .map_err(|_| ClientError::OutsideAuthScope)
}

/// Authentication state and actions.
pub struct AuthContext {
    auth: AuthService,
    session: Arc<SessionHandle>,
    navigator: Arc<dyn Navigator>,
    loading: AtomicBool,
}

impl AuthContext {
    /// Context that has not yet read durable storage. Reports loading until
    /// [`hydrate`](Self::hydrate) runs.
    pub fn new(
        auth: AuthService,
        session: Arc<SessionHandle>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            session,
            navigator,
            loading: AtomicBool::new(true),
        }
    }

    /// Context restored from durable storage.
    pub fn init(
        auth: AuthService,
        session: Arc<SessionHandle>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let ctx = Self::new(auth, session, navigator);
        let _ = ctx.hydrate();
        ctx
    }

    /// Restore `{token, user}` from durable storage. Both entries must be
    /// present and the user must parse; otherwise the context stays
    /// signed out.
    pub fn hydrate(&self) -> Option<User> {
        let restored = self.session.hydrate().map(|s| s.user);
        match &restored {
            Some(user) => tracing::debug!(user = %user.id, "restored session"),
            None => tracing::debug!("no stored session"),
        }
        self.loading.store(false, Ordering::Release);
        restored
    }

    /// Whether hydration is still pending.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<User> {
        self.session.current().map(|s| s.user)
    }

    /// The session token.
    pub fn token(&self) -> Option<String> {
        self.session.current().map(|s| s.token)
    }

    /// Whether someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.session.current().is_some()
    }

    /// Whether the signed-in user may edit and delete projects.
    pub fn is_admin(&self) -> bool {
        self.session.current().is_some_and(|s| s.user.is_admin())
    }

    /// Sign in. On failure the state is unchanged and the API error is
    /// returned as-is.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, ClientError> {
        let resp = self.auth.login(credentials).await?;
        self.adopt(resp)
    }

    /// Create a company and sign in as its admin with the returned token.
    pub async fn register(&self, user: &CreateUser) -> Result<User, ClientError> {
        let resp = self.auth.register(user).await?;
        self.adopt(resp)
    }

    /// Sign out and go to the login route.
    pub fn logout(&self) -> Result<(), ClientError> {
        let cleared = self.session.clear();
        tracing::info!("signed out");
        self.navigator.navigate(LOGIN_ROUTE);
        cleared.map_err(ClientError::from)
    }

    fn adopt(&self, resp: AuthResponse) -> Result<User, ClientError> {
        let user = resp.user.clone();
        self.session.persist(Session {
            token: resp.access_token,
            user: resp.user,
        })?;
        tracing::info!(user = %user.id, "signed in");
        Ok(user)
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("session", &self.session)
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
