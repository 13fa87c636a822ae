//! Admin session handlers
//!
//! Sign-in is delegated to Supabase GoTrue; only accounts holding the
//! `admin` role get a session back. Failures render as [`AuthError`], the
//! same way the auth extractors reject.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use torneo_auth::{AdminUser, AuthError, AuthIdentity, AuthRole, BearerToken, Session};
use torneo_common::ValidatedJson;
use validator::Validate;

use crate::api::middleware::TeamsState;

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: AuthIdentity,
    pub roles: Vec<AuthRole>,
}

impl SessionResponse {
    fn new(session: Session, user: AuthIdentity, roles: Vec<AuthRole>) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            user,
            roles,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub user: AuthIdentity,
    pub roles: Vec<AuthRole>,
}

/// Sign in as an administrator
///
/// **POST /v1/admin/session**
///
/// Non-admin accounts are signed out again and receive 403.
pub async fn sign_in(
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> Result<Json<SessionResponse>, AuthError> {
    let (session, context) = state
        .auth
        .sign_in_admin(&request.email, &request.password)
        .await?;

    Ok(Json(SessionResponse::new(
        session,
        context.user,
        context.roles,
    )))
}

/// Current administrator
///
/// **GET /v1/admin/session**
pub async fn current_admin(AdminUser(context): AdminUser) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        user: context.user,
        roles: context.roles,
    })
}

/// Sign out
///
/// **DELETE /v1/admin/session**
pub async fn sign_out(
    State(state): State<TeamsState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, AuthError> {
    state.auth.sign_out(&token).await?;
    tracing::info!("Admin signed out");
    Ok(StatusCode::NO_CONTENT)
}
