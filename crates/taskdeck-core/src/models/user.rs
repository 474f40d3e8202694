//! User records and sign-up payloads.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Role of a user within their company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Can manage projects and company users.
    Admin,
    /// Regular member.
    #[default]
    Member,
}

/// A user as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Server-assigned identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Company role.
    pub role: UserRole,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl User {
    /// Whether the user may edit and delete projects.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Payload for `POST /auth/register` (creates a company and its admin).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain-text password, sent over TLS.
    pub password: String,
    /// Name of the company to create.
    pub company_name: String,
}

/// Payload for `POST /users/company-user` (adds a member to the caller's company).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCompanyUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain-text password, sent over TLS.
    pub password: String,
}
