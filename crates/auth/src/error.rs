//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header required")]
    MissingAuthorization,
    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid user ID in token")]
    InvalidUserId,
    #[error("Failed to load user roles")]
    RoleLoadError,
    /// Authenticated, but no `admin` row in `user_roles`
    #[error("Admin role required")]
    NotAdmin,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Sign-in failed: {0}")]
    SignInFailed(String),
    #[error("Sign-out failed: {0}")]
    SignOutFailed(String),
}

impl AuthError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::MissingAuthorization => {
                (StatusCode::UNAUTHORIZED, "MISSING_AUTHORIZATION")
            }
            AuthError::InvalidAuthorizationFormat => {
                (StatusCode::UNAUTHORIZED, "INVALID_AUTHORIZATION")
            }
            AuthError::InvalidToken | AuthError::InvalidUserId => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN")
            }
            AuthError::RoleLoadError => (StatusCode::INTERNAL_SERVER_ERROR, "ROLE_LOAD_ERROR"),
            AuthError::NotAdmin => (StatusCode::FORBIDDEN, "NOT_ADMIN"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthError::SignInFailed(_) => (StatusCode::BAD_GATEWAY, "SIGN_IN_FAILED"),
            AuthError::SignOutFailed(_) => (StatusCode::BAD_GATEWAY, "SIGN_OUT_FAILED"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Authentication failure");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for torneo_common::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAdmin => torneo_common::Error::Authorization(err.to_string()),
            AuthError::RoleLoadError => torneo_common::Error::Internal(err.to_string()),
            AuthError::SignInFailed(_) | AuthError::SignOutFailed(_) => {
                torneo_common::Error::Unavailable(err.to_string())
            }
            other => torneo_common::Error::Authentication(other.to_string()),
        }
    }
}
