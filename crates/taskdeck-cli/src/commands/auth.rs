//! `login`, `register`, `logout`, `whoami`.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Value, json};
use taskdeck_client::auth_context;
use taskdeck_core::models::{CreateUser, LoginRequest};

use super::to_json;

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long)]
    pub email: String,

    /// Account password.
    #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Your name.
    #[arg(long)]
    pub name: String,

    /// Account email.
    #[arg(long)]
    pub email: String,

    /// Account password.
    #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Company to create. You become its admin.
    #[arg(long)]
    pub company: String,
}

pub async fn login(args: LoginArgs) -> Result<Value> {
    let ctx = auth_context::current()?;
    let user = ctx
        .login(&LoginRequest {
            email: args.email,
            password: args.password,
        })
        .await
        .context("Login failed")?;
    to_json(&user)
}

pub async fn register(args: RegisterArgs) -> Result<Value> {
    let ctx = auth_context::current()?;
    let user = ctx
        .register(&CreateUser {
            name: args.name,
            email: args.email,
            password: args.password,
            company_name: args.company,
        })
        .await
        .context("Registration failed")?;
    to_json(&user)
}

pub fn logout() -> Result<Value> {
    auth_context::current()?.logout()?;
    Ok(json!({ "signedOut": true }))
}

pub fn whoami() -> Result<Value> {
    let ctx = auth_context::current()?;
    match ctx.user() {
        Some(user) => Ok(json!({
            "user": user,
            "admin": ctx.is_admin(),
        })),
        None => anyhow::bail!("Not signed in. Run `taskdeck login`."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::app;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn login_then_whoami_then_logout() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "jwt",
                "user": {"id": "u1", "name": "Ana", "email": "ana@example.com", "role": "admin"}
            })))
            .mount(&server)
            .await;

        let app = app(&server.uri(), dir.path());
        auth_context::scope(app.auth(), async {
            let user = login(LoginArgs {
                email: "ana@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
            assert_eq!(user["id"], "u1");

            let me = whoami().unwrap();
            assert_eq!(me["admin"], true);

            let _ = logout().unwrap();
            assert!(whoami().is_err());
        })
        .await;

        assert!(app.session_ended());
        assert!(!dir.path().join("session.json").exists());
    }

    #[tokio::test]
    async fn session_survives_between_runs() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "access_token": "jwt",
                "user": {"id": "u1", "name": "Ana", "role": "admin"}
            })))
            .mount(&server)
            .await;

        let first = app(&server.uri(), dir.path());
        auth_context::scope(first.auth(), async {
            let _ = register(RegisterArgs {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                password: "secret".into(),
                company: "Acme".into(),
            })
            .await
            .unwrap();
        })
        .await;

        let second = app(&server.uri(), dir.path());
        let me = auth_context::scope(second.auth(), async { whoami() })
            .await
            .unwrap();
        assert_eq!(me["user"]["name"], "Ana");
    }
}
