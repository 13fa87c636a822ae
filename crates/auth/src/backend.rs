//! Concrete authentication backend
//!
//! Wraps the role source + `AuthConfig` and owns the auth-specific queries.
//! Uses runtime `sqlx::query_as` (not macros) so the crate builds without a
//! live database.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::session::SessionClient;
use crate::types::{AuthIdentity, AuthRole, Session};

/// Row type for role lookup
#[derive(sqlx::FromRow)]
struct RoleRow {
    role: AuthRole,
}

/// Where role rows come from.
#[derive(Clone)]
enum RoleSource {
    Postgres(PgPool),
    /// Fixed assignments, used with the mock store and in tests.
    Static(Arc<HashMap<Uuid, Vec<AuthRole>>>),
}

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    roles: RoleSource,
    config: AuthConfig,
    sessions: SessionClient,
}

impl AuthBackend {
    pub fn new(pool: PgPool, config: AuthConfig) -> Self {
        Self {
            roles: RoleSource::Postgres(pool),
            sessions: SessionClient::new(&config),
            config,
        }
    }

    /// Backend whose role rows are fixed at construction time.
    pub fn with_static_roles(config: AuthConfig, roles: HashMap<Uuid, Vec<AuthRole>>) -> Self {
        Self {
            roles: RoleSource::Static(Arc::new(roles)),
            sessions: SessionClient::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Roles held by a user (`user_roles` rows)
    pub async fn find_roles(&self, user_id: Uuid) -> Result<Vec<AuthRole>, AuthError> {
        match &self.roles {
            RoleSource::Static(roles) => Ok(roles.get(&user_id).cloned().unwrap_or_default()),
            RoleSource::Postgres(pool) => {
                let rows: Vec<RoleRow> = sqlx::query_as(
                    r#"
                    SELECT role
                    FROM user_roles
                    WHERE user_id = $1
                    "#,
                )
                .bind(user_id)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, user_id = %user_id, "Failed to load user roles");
                    AuthError::RoleLoadError
                })?;

                Ok(rows.into_iter().map(|r| r.role).collect())
            }
        }
    }

    /// Validate a bearer JWT and load the caller's roles.
    pub(crate) async fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = crate::jwt::validate_jwt_token(token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;
        let roles = self.find_roles(user_id).await?;

        Ok(AuthContext::new(
            AuthIdentity {
                id: user_id,
                email: claims.email,
            },
            roles,
        ))
    }

    /// Password sign-in restricted to administrators.
    ///
    /// A user without an `admin` role row is signed out again before the
    /// error is returned, so no usable session leaks to non-admins.
    pub async fn sign_in_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Session, AuthContext), AuthError> {
        let session = self.sessions.sign_in(email, password).await?;
        let roles = self.find_roles(session.user.id).await?;

        let context = AuthContext::new(
            AuthIdentity {
                id: session.user.id,
                email: session.user.email.clone(),
            },
            roles,
        );

        if !context.is_admin() {
            tracing::warn!(user_id = %context.user.id, "Non-admin sign-in attempt");
            if let Err(e) = self.sessions.sign_out(&session.access_token).await {
                tracing::warn!(error = %e, user_id = %context.user.id, "Failed to revoke non-admin session");
            }
            return Err(AuthError::NotAdmin);
        }

        tracing::info!(user_id = %context.user.id, "Admin signed in");
        Ok((session, context))
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.sessions.sign_out(access_token).await
    }
}
