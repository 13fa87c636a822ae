//! Public team registration
//!
//! Validates the whole request up front, then writes the team and its
//! roster. If the roster cannot be stored the team row is removed again.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use torneo_common::RepositoryError;
use uuid::Uuid;

use super::RefreshTrigger;
use crate::domain::entities::{Category, NewTeam, TeamWithPlayers};
use crate::domain::policy::{validate_roster_size, RosterError};
use crate::domain::validation::{normalize_player_name, ValidationError};
use crate::repository::RosterStore;

/// A team registration as submitted
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub category: Category,
    pub team_name: String,
    pub person_in_charge: String,
    pub player_names: Vec<String>,
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `position` is 1-based
    #[error("player {position} has no name")]
    IncompleteRoster { position: usize },

    #[error(transparent)]
    InvalidSize(#[from] RosterError),

    #[error("could not save the team: {0}")]
    Repository(#[from] RepositoryError),

    #[error("the roster could not be saved, registration was undone: {source}")]
    RosterNotSaved { source: RepositoryError },

    #[error("team {team_id} was saved without its roster: {source}")]
    PartiallyRegistered {
        team_id: Uuid,
        source: RepositoryError,
    },
}

impl From<RegistrationError> for torneo_common::Error {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Validation(e) => e.into(),
            RegistrationError::IncompleteRoster { .. } => {
                torneo_common::Error::Validation(err.to_string())
            }
            RegistrationError::InvalidSize(e) => e.into(),
            RegistrationError::Repository(e) => e.into(),
            RegistrationError::RosterNotSaved { ref source } => match source {
                RepositoryError::Unavailable(_) => {
                    torneo_common::Error::Unavailable(err.to_string())
                }
                _ => torneo_common::Error::Rejected(err.to_string()),
            },
            RegistrationError::PartiallyRegistered { .. } => {
                torneo_common::Error::PartiallyApplied(err.to_string())
            }
        }
    }
}

/// Registers new teams together with their initial roster
#[derive(Clone)]
pub struct RegistrationWorkflow {
    store: Arc<dyn RosterStore>,
    trigger: RefreshTrigger,
}

impl RegistrationWorkflow {
    pub fn new(store: Arc<dyn RosterStore>, trigger: RefreshTrigger) -> Self {
        Self { store, trigger }
    }

    pub async fn register_team(
        &self,
        request: RegistrationRequest,
    ) -> Result<TeamWithPlayers, RegistrationError> {
        let new_team = NewTeam::new(
            &request.team_name,
            &request.person_in_charge,
            request.category,
            0,
        )?;

        let player_names = request
            .player_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                normalize_player_name(name).map_err(|err| match err {
                    ValidationError::Blank(_) => {
                        RegistrationError::IncompleteRoster { position: i + 1 }
                    }
                    other => RegistrationError::Validation(other),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        validate_roster_size(request.category, player_names.len())?;

        // Bounded by the category cap
        let new_team = NewTeam {
            player_count: player_names.len() as i32,
            ..new_team
        };

        let team = self.store.create_team(new_team).await?;

        let players = match self.store.create_players(team.id, &player_names).await {
            Ok(players) => players,
            Err(source) => return Err(self.compensate(team.id, source).await),
        };

        tracing::info!(
            team_id = %team.id,
            category = %team.category,
            players = players.len(),
            "Team registered"
        );
        self.trigger.notify();

        Ok(TeamWithPlayers { team, players })
    }

    /// Undo a team insert whose roster failed to store
    async fn compensate(&self, team_id: Uuid, source: RepositoryError) -> RegistrationError {
        tracing::warn!(team_id = %team_id, error = %source, "Roster insert failed, removing team");

        match self.store.delete_team(team_id).await {
            Ok(()) => RegistrationError::RosterNotSaved { source },
            Err(cleanup) => {
                tracing::error!(
                    team_id = %team_id,
                    error = %source,
                    cleanup_error = %cleanup,
                    "Team left without roster after failed cleanup"
                );
                // The orphaned team row is visible to readers
                self.trigger.notify();
                RegistrationError::PartiallyRegistered { team_id, source }
            }
        }
    }
}
