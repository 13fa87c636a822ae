//! Torneo application composition root
//!
//! Wires the roster store, the auth backend, and the domain routers into a
//! single application.

use std::collections::HashMap;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use sqlx::PgPool;
use torneo_auth::{AuthBackend, AuthConfig, AuthRole};
use torneo_common::{Config, StoreProvider};
use torneo_teams::{RosterStoreFactory, StoreConfig, TeamsState};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all routes
///
/// `pool` must be set for the postgres store provider. With the mock
/// provider, admin roles come from `ADMIN_USER_IDS`.
pub async fn create_app(config: &Config, pool: Option<PgPool>) -> Result<Router, anyhow::Error> {
    let auth_config = AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
        supabase_url: config.supabase_url.clone(),
        supabase_anon_key: config.supabase_anon_key.clone(),
    };

    let auth = match (&config.store_provider, &pool) {
        (StoreProvider::Postgres, Some(pool)) => AuthBackend::new(pool.clone(), auth_config),
        (StoreProvider::Postgres, None) => {
            return Err(anyhow::anyhow!(
                "a database pool is required for the postgres store provider"
            ))
        }
        (StoreProvider::Mock, _) => {
            let raw = std::env::var("ADMIN_USER_IDS").unwrap_or_default();
            let roles = static_admin_roles(&raw)?;
            tracing::warn!(admins = roles.len(), "Using in-memory store and static admin roles");
            AuthBackend::with_static_roles(auth_config, roles)
        }
    };

    let store = RosterStoreFactory::create(StoreConfig {
        provider: config.store_provider,
        pool,
    })?;

    Ok(build_router(TeamsState::new(store, auth)))
}

/// Compose domain routers with the shared infrastructure routes
pub fn build_router(teams_state: TeamsState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { concat!("Torneo API v", env!("CARGO_PKG_VERSION")) }),
        )
        .merge(torneo_teams::routes().with_state(teams_state))
}

/// Parse a comma-separated list of user ids into admin role grants
pub fn static_admin_roles(raw: &str) -> Result<HashMap<Uuid, Vec<AuthRole>>, anyhow::Error> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(s)
                .map(|id| (id, vec![AuthRole::Admin]))
                .map_err(|e| anyhow::anyhow!("Invalid id in ADMIN_USER_IDS ({}): {}", s, e))
        })
        .collect()
}

/// CORS for the configured origins; `*` or nothing allows any origin
pub fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let allowed: Vec<HeaderValue> = origins
        .unwrap_or("*")
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Shared middleware stack for both binaries
pub fn with_middleware(app: Router, cors_origins: Option<&str>) -> Router {
    app.layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(cors_origins))
        .layer(body_limit_layer())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
