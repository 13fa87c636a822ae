//! Admin roster handlers
//!
//! Every handler takes [`AdminUser`], so callers need a valid JWT and an
//! `admin` role row. Workflow calls are serialized through the admin mutex.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use torneo_auth::AdminUser;
use torneo_common::{Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::TeamsState;
use crate::domain::entities::{Category, Player, Team, TeamWithPlayers};
use crate::workflow::RosterSummary;

#[derive(Debug, Serialize)]
pub struct AdminTeamsResponse {
    pub summary: RosterSummary,
    pub teams: Vec<TeamWithPlayers>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 2, max = 100))]
    pub team_name: String,

    #[validate(length(min = 2, max = 100))]
    pub person_in_charge: String,

    pub category: Category,
}

/// Partial team update; at least one field must be present
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 2, max = 100))]
    pub team_name: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub person_in_charge: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PlayerNameRequest {
    #[validate(length(min = 1, max = 100))]
    pub player_name: String,
}

/// Admin listing, always re-read from the store
///
/// **GET /v1/admin/teams**
pub async fn list_teams(
    _admin: AdminUser,
    State(state): State<TeamsState>,
) -> Result<Json<AdminTeamsResponse>> {
    let mut admin = state.admin.lock().await;
    let teams = admin.refresh().await?;

    Ok(Json(AdminTeamsResponse {
        summary: RosterSummary::from_teams(teams),
        teams: teams.to_vec(),
    }))
}

/// Create a team without players
///
/// **POST /v1/admin/teams**
pub async fn create_team(
    AdminUser(context): AdminUser,
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>)> {
    let team = state
        .admin
        .lock()
        .await
        .create_team_manually(&request.team_name, &request.person_in_charge, request.category)
        .await?;

    tracing::info!(admin_id = %context.user.id, team_id = %team.id, "Admin created team");
    Ok((StatusCode::CREATED, Json(team)))
}

/// **PATCH /v1/admin/teams/{id}**
pub async fn update_team(
    AdminUser(context): AdminUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateTeamRequest>,
) -> Result<StatusCode> {
    state
        .admin
        .lock()
        .await
        .edit_team_fields(
            team_id,
            request.team_name.as_deref(),
            request.person_in_charge.as_deref(),
        )
        .await?;

    tracing::info!(admin_id = %context.user.id, team_id = %team_id, "Admin updated team");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a team and its players
///
/// **DELETE /v1/admin/teams/{id}**
pub async fn delete_team(
    AdminUser(context): AdminUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.admin.lock().await.delete_team_by_id(team_id).await?;

    tracing::info!(admin_id = %context.user.id, team_id = %team_id, "Admin deleted team");
    Ok(StatusCode::NO_CONTENT)
}

/// Add a single player, up to the admin roster cap
///
/// **POST /v1/admin/teams/{id}/players**
pub async fn add_player(
    AdminUser(context): AdminUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<PlayerNameRequest>,
) -> Result<(StatusCode, Json<Player>)> {
    let player = state
        .admin
        .lock()
        .await
        .add_player_to_team(team_id, &request.player_name)
        .await?;

    tracing::info!(admin_id = %context.user.id, team_id = %team_id, player_id = %player.id, "Admin added player");
    Ok((StatusCode::CREATED, Json(player)))
}

/// **PATCH /v1/admin/players/{id}**
pub async fn update_player(
    AdminUser(context): AdminUser,
    State(state): State<TeamsState>,
    Path(player_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<PlayerNameRequest>,
) -> Result<StatusCode> {
    state
        .admin
        .lock()
        .await
        .edit_player_name(player_id, &request.player_name)
        .await?;

    tracing::info!(admin_id = %context.user.id, player_id = %player_id, "Admin renamed player");
    Ok(StatusCode::NO_CONTENT)
}

/// **DELETE /v1/admin/players/{id}**
pub async fn delete_player(
    AdminUser(context): AdminUser,
    State(state): State<TeamsState>,
    Path(player_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .admin
        .lock()
        .await
        .delete_player_by_id(player_id)
        .await?;

    tracing::info!(admin_id = %context.user.id, player_id = %player_id, "Admin deleted player");
    Ok(StatusCode::NO_CONTENT)
}
