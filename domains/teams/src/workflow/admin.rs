//! Administrative roster mutations
//!
//! Every committed write notifies the [`RefreshTrigger`] and refreshes the
//! owned cache. A failed follow-up refresh never fails the operation and the
//! write is never retried; the cache is marked stale instead. Writes from
//! other workflows reach the cache through the same trigger.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use torneo_common::RepositoryError;
use uuid::Uuid;

use super::{RefreshTrigger, RosterCache};
use crate::domain::entities::{Category, NewTeam, Player, Team, TeamPatch, TeamWithPlayers};
use crate::domain::policy::{validate_admin_addition, RosterError};
use crate::domain::validation::{
    normalize_person_name, normalize_player_name, normalize_team_name, ValidationError,
};
use crate::repository::RosterStore;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The player write committed but the team counter was not updated
    #[error("player count of team {team_id} was not updated: {source}")]
    CountNotUpdated {
        team_id: Uuid,
        source: RepositoryError,
    },
}

impl From<AdminError> for torneo_common::Error {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::Validation(e) => e.into(),
            AdminError::Roster(e) => e.into(),
            AdminError::Repository(e) => e.into(),
            AdminError::CountNotUpdated { .. } => {
                torneo_common::Error::PartiallyApplied(err.to_string())
            }
        }
    }
}

/// Admin-side roster operations over an owned cache
pub struct AdminWorkflow {
    store: Arc<dyn RosterStore>,
    cache: RosterCache,
    trigger: RefreshTrigger,
    changes: watch::Receiver<u64>,
    /// Trigger generation the cache was last loaded at
    seen: Option<u64>,
}

impl AdminWorkflow {
    pub fn new(store: Arc<dyn RosterStore>, trigger: RefreshTrigger) -> Self {
        Self {
            cache: RosterCache::new(store.clone()),
            store,
            changes: trigger.subscribe(),
            trigger,
            seen: None,
        }
    }

    /// Cached admin listing
    pub fn teams(&self) -> &[TeamWithPlayers] {
        self.cache.teams()
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_stale()
    }

    pub async fn refresh(&mut self) -> Result<&[TeamWithPlayers], RepositoryError> {
        self.reload().await?;
        Ok(self.cache.teams())
    }

    /// Reload the cache, remembering the generation it reflects
    async fn reload(&mut self) -> Result<(), RepositoryError> {
        let generation = *self.changes.borrow_and_update();
        self.cache.refresh().await?;
        self.seen = Some(generation);
        Ok(())
    }

    /// Reload when nothing is cached, the cache is stale, or another writer
    /// bumped the trigger since the last load
    async fn ensure_loaded(&mut self) -> Result<(), RepositoryError> {
        let generation = *self.changes.borrow();
        if !self.cache.is_loaded() || self.cache.is_stale() || self.seen != Some(generation) {
            self.reload().await?;
        }
        Ok(())
    }

    /// Publish a committed write
    async fn committed(&mut self) {
        self.trigger.notify();
        if let Err(err) = self.reload().await {
            tracing::warn!(error = %err, "Refresh after admin write failed, cache is stale");
            self.cache.mark_stale();
        }
    }

    pub async fn edit_team_fields(
        &mut self,
        team_id: Uuid,
        team_name: Option<&str>,
        person_in_charge: Option<&str>,
    ) -> Result<(), AdminError> {
        let patch = TeamPatch {
            team_name: team_name.map(normalize_team_name).transpose()?,
            person_in_charge: person_in_charge.map(normalize_person_name).transpose()?,
            player_count: None,
        };
        if patch.is_empty() {
            return Err(ValidationError::EmptyUpdate.into());
        }

        self.store.update_team(team_id, patch).await?;
        tracing::info!(team_id = %team_id, "Team updated");

        self.committed().await;
        Ok(())
    }

    /// Delete a team and, first, every player that references it
    pub async fn delete_team_by_id(&mut self, team_id: Uuid) -> Result<(), AdminError> {
        let removed = self.store.delete_players_for_team(team_id).await?;

        if let Err(err) = self.store.delete_team(team_id).await {
            if removed > 0 {
                tracing::warn!(
                    team_id = %team_id,
                    removed,
                    error = %err,
                    "Players removed but team delete failed"
                );
                self.committed().await;
            }
            return Err(err.into());
        }

        tracing::info!(team_id = %team_id, players = removed, "Team deleted");
        self.committed().await;
        Ok(())
    }

    pub async fn edit_player_name(&mut self, player_id: Uuid, name: &str) -> Result<(), AdminError> {
        let name = normalize_player_name(name)?;

        self.store.update_player(player_id, &name).await?;
        tracing::info!(player_id = %player_id, "Player renamed");

        self.committed().await;
        Ok(())
    }

    /// Delete a player and bring its team's stored counter back in line
    pub async fn delete_player_by_id(&mut self, player_id: Uuid) -> Result<(), AdminError> {
        // A failed load only costs the counter resync
        if let Err(err) = self.ensure_loaded().await {
            tracing::debug!(error = %err, "Deleting player without a loaded roster");
        }
        let owner = self
            .cache
            .find_by_player(player_id)
            .map(|t| (t.id(), t.players.len()));

        self.store.delete_player(player_id).await?;
        tracing::info!(player_id = %player_id, "Player deleted");

        let resync = match owner {
            Some((team_id, cached)) => {
                let remaining = cached.saturating_sub(1) as i32;
                self.store
                    .update_team(team_id, TeamPatch::player_count(remaining))
                    .await
                    .map_err(|source| AdminError::CountNotUpdated { team_id, source })
            }
            None => Ok(()),
        };

        self.committed().await;
        resync
    }

    /// Create a team with no players, bypassing registration roster rules
    pub async fn create_team_manually(
        &mut self,
        team_name: &str,
        person_in_charge: &str,
        category: Category,
    ) -> Result<Team, AdminError> {
        let new_team = NewTeam::new(team_name, person_in_charge, category, 0)?;

        let team = self.store.create_team(new_team).await?;
        tracing::info!(team_id = %team.id, category = %team.category, "Team created manually");

        self.committed().await;
        Ok(team)
    }

    /// Add one player, up to the administrative cap
    pub async fn add_player_to_team(
        &mut self,
        team_id: Uuid,
        name: &str,
    ) -> Result<Player, AdminError> {
        let name = normalize_player_name(name)?;

        self.ensure_loaded().await?;
        let current = self
            .cache
            .find(team_id)
            .map(|t| t.team.player_count.max(0) as usize)
            .ok_or(RepositoryError::NotFound)?;
        validate_admin_addition(current)?;

        let player = self.store.create_player(team_id, &name).await?;
        tracing::info!(team_id = %team_id, player_id = %player.id, "Player added");

        let counted = self
            .store
            .update_team(team_id, TeamPatch::player_count(current as i32 + 1))
            .await;

        self.committed().await;

        match counted {
            Ok(()) => Ok(player),
            Err(source) => {
                tracing::warn!(team_id = %team_id, error = %source, "Player added but count not updated");
                Err(AdminError::CountNotUpdated { team_id, source })
            }
        }
    }
}
