//! Supabase GoTrue session client
//!
//! Password sign-in at `{supabase_url}/auth/v1/token?grant_type=password`
//! and sign-out at `{supabase_url}/auth/v1/logout`.

use reqwest::StatusCode;
use serde::Serialize;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::Session;

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

/// HTTP client for the Supabase auth endpoints.
#[derive(Clone)]
pub struct SessionClient {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl SessionClient {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_url: format!("{}/auth/v1", config.supabase_url.trim_end_matches('/')),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    /// Exchange email + password for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(format!("{}/token", self.auth_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(|e| AuthError::SignInFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            tracing::info!(status = %status, "Sign-in rejected by auth provider");
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(AuthError::SignInFailed(format!(
                "auth provider returned {}: {}",
                status, body
            )));
        }

        let session: Session = response
            .json()
            .await
            .map_err(|e| AuthError::SignInFailed(format!("malformed session: {}", e)))?;

        tracing::debug!(user_id = %session.user.id, "Session issued");
        Ok(session)
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::SignOutFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidToken);
        }
        if !status.is_success() {
            return Err(AuthError::SignOutFailed(format!(
                "auth provider returned {}",
                status
            )));
        }

        Ok(())
    }
}
