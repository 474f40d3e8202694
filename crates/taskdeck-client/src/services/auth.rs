//! `/auth` endpoints.

use taskdeck_core::models::{AuthResponse, CreateUser, LoginRequest};

use crate::errors::ApiError;
use crate::http::ApiClient;

/// Login and company registration.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    /// Service on `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token.
    #[tracing::instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.api.post("/auth/login", credentials).await
    }

    /// Create a company and its first (admin) user.
    #[tracing::instrument(skip_all, fields(email = %user.email, company = %user.company_name))]
    pub async fn register(&self, user: &CreateUser) -> Result<AuthResponse, ApiError> {
        self.api.post("/auth/register", user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_api, user_json};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn login_posts_credentials() {
        let server = MockServer::start().await;
        let api = test_api(&server);

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "ana@example.com",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "jwt-1",
                "user": user_json("u1", "admin")
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = AuthService::new(api.client)
            .login(&LoginRequest {
                email: "ana@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(resp.access_token, "jwt-1");
        assert!(resp.user.is_admin());
    }

    #[tokio::test]
    async fn register_posts_company() {
        let server = MockServer::start().await;
        let api = test_api(&server);

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(body_json(serde_json::json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "secret",
                "company_name": "Acme"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "access_token": "jwt-2",
                "user": user_json("u1", "admin")
            })))
            .mount(&server)
            .await;

        let resp = AuthService::new(api.client)
            .register(&CreateUser {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                password: "secret".into(),
                company_name: "Acme".into(),
            })
            .await
            .unwrap();
        assert_eq!(resp.access_token, "jwt-2");
    }

    #[tokio::test]
    async fn bad_credentials_do_not_navigate() {
        let server = MockServer::start().await;
        let api = test_api(&server);

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let err = AuthService::new(api.client.clone())
            .login(&LoginRequest::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid credentials"));
        assert!(api.navigator.visited().is_empty());
    }
}
