//! Auth read-model and session types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lightweight identity for authenticated callers, taken from JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Application role stored in the `user_roles` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "app_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuthRole {
    Admin,
    User,
}

impl AuthRole {
    /// Check if this role grants access to the admin panel
    pub fn can_admin(&self) -> bool {
        matches!(self, AuthRole::Admin)
    }
}

impl std::fmt::Display for AuthRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthRole::Admin => write!(f, "admin"),
            AuthRole::User => write!(f, "user"),
        }
    }
}

/// User record embedded in a GoTrue token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session returned by a successful password sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: u64,
    pub user: SessionUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
