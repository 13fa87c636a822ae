//! Public roster handlers
//!
//! The listing is served from the shared [`RosterView`](crate::RosterView);
//! registration goes through the registration workflow.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use torneo_common::{Error, Result, ValidatedJson, ValidatedQuery};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::TeamsState;
use crate::domain::entities::{Category, CategoryFilter, TeamWithPlayers};
use crate::workflow::{filter_by_category, ExpandedTeams, RegistrationRequest, RosterSummary};

/// Query for the public listing.
///
/// The client owns the expanded-team set: it sends the set it currently
/// shows plus an optional id to toggle, and gets the resulting set back.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListTeamsQuery {
    #[serde(default)]
    pub category: CategoryFilter,

    /// Comma-separated team ids
    #[validate(length(max = 4000))]
    pub expanded: Option<String>,

    pub toggle: Option<Uuid>,
}

impl ListTeamsQuery {
    fn expanded_teams(&self) -> Result<ExpandedTeams> {
        self.expanded
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Uuid::parse_str(s)
                    .map_err(|_| Error::Validation(format!("Invalid team id in expanded: {s}")))
            })
            .collect()
    }
}

/// One row of the public listing
#[derive(Debug, Serialize)]
pub struct TeamListing {
    #[serde(flatten)]
    pub team: TeamWithPlayers,
    pub expanded: bool,
}

#[derive(Debug, Serialize)]
pub struct TeamListResponse {
    /// Counts over every team, independent of the category filter
    pub summary: RosterSummary,
    pub teams: Vec<TeamListing>,
    pub expanded: ExpandedTeams,
}

/// Request for registering a team
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterTeamRequest {
    pub category: Category,

    #[validate(length(min = 2, max = 100))]
    pub team_name: String,

    #[validate(length(min = 2, max = 100))]
    pub person_in_charge: String,

    /// Roster size is checked per category by the workflow
    #[validate(length(max = 1000))]
    pub player_names: Vec<String>,
}

impl From<RegisterTeamRequest> for RegistrationRequest {
    fn from(request: RegisterTeamRequest) -> Self {
        Self {
            category: request.category,
            team_name: request.team_name,
            person_in_charge: request.person_in_charge,
            player_names: request.player_names,
        }
    }
}

/// List registered teams
///
/// **GET /v1/teams?category=all|men|women**
pub async fn list_teams(
    State(state): State<TeamsState>,
    ValidatedQuery(query): ValidatedQuery<ListTeamsQuery>,
) -> Result<Json<TeamListResponse>> {
    let expanded = query.expanded_teams()?;

    let mut view = state.view.lock().await;
    let teams = view.current().await?;

    let mut expanded = expanded.retain_known(teams);
    if let Some(team_id) = query.toggle {
        expanded = expanded.toggle(team_id).retain_known(teams);
    }

    let listing = filter_by_category(teams, query.category)
        .into_iter()
        .map(|team| TeamListing {
            expanded: expanded.is_expanded(team.id()),
            team,
        })
        .collect();

    Ok(Json(TeamListResponse {
        summary: RosterSummary::from_teams(teams),
        teams: listing,
        expanded,
    }))
}

/// Register a team with its roster
///
/// **POST /v1/teams/register**
///
/// Roster size is capped per category (12 men, 13 women).
pub async fn register_team(
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<RegisterTeamRequest>,
) -> Result<(StatusCode, Json<TeamWithPlayers>)> {
    let registered = state.registration.register_team(request.into()).await?;
    Ok((StatusCode::CREATED, Json(registered)))
}
