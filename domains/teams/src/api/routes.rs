//! Route definitions for Teams domain API

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{admin, session, teams};
use super::middleware::TeamsState;

/// Public listing and registration
fn public_routes() -> Router<TeamsState> {
    Router::new()
        .route("/v1/teams", get(teams::list_teams))
        .route("/v1/teams/register", post(teams::register_team))
}

/// Admin sign-in, sign-out, and introspection
fn session_routes() -> Router<TeamsState> {
    Router::new().route(
        "/v1/admin/session",
        post(session::sign_in)
            .get(session::current_admin)
            .delete(session::sign_out),
    )
}

/// Admin roster management
fn admin_routes() -> Router<TeamsState> {
    Router::new()
        .route(
            "/v1/admin/teams",
            get(admin::list_teams).post(admin::create_team),
        )
        .route(
            "/v1/admin/teams/{id}",
            patch(admin::update_team).delete(admin::delete_team),
        )
        .route("/v1/admin/teams/{id}/players", post(admin::add_player))
        .route(
            "/v1/admin/players/{id}",
            patch(admin::update_player).delete(admin::delete_player),
        )
}

/// Create all Teams domain API routes
pub fn routes() -> Router<TeamsState> {
    Router::new()
        .merge(public_routes())
        .merge(session_routes())
        .merge(admin_routes())
}
