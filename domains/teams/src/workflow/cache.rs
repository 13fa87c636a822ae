//! Roster synchronization cache
//!
//! Holds the last consistent snapshot of teams joined with their players.
//! A refresh replaces the snapshot wholesale or not at all. The helpers in
//! this module are pure and operate on snapshots.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use torneo_common::RepositoryError;
use uuid::Uuid;

use crate::domain::entities::{Category, CategoryFilter, Player, Team, TeamWithPlayers};
use crate::repository::RosterStore;

/// In-memory projection of the stored roster
pub struct RosterCache {
    store: Arc<dyn RosterStore>,
    teams: Vec<TeamWithPlayers>,
    loaded: bool,
    stale: bool,
}

impl RosterCache {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self {
            store,
            teams: Vec::new(),
            loaded: false,
            stale: false,
        }
    }

    /// Re-read teams and players and rebuild the snapshot.
    ///
    /// On error the previous snapshot is left as it was.
    pub async fn refresh(&mut self) -> Result<&[TeamWithPlayers], RepositoryError> {
        let teams = self.store.list_teams().await?;
        let players = self.store.list_players().await?;

        self.teams = group_players(teams, players);
        self.loaded = true;
        self.stale = false;

        tracing::debug!(teams = self.teams.len(), "Roster cache refreshed");
        Ok(&self.teams)
    }

    /// Last snapshot, newest team first
    pub fn teams(&self) -> &[TeamWithPlayers] {
        &self.teams
    }

    pub fn find(&self, team_id: Uuid) -> Option<&TeamWithPlayers> {
        self.teams.iter().find(|t| t.id() == team_id)
    }

    /// Team holding the given player
    pub fn find_by_player(&self, player_id: Uuid) -> Option<&TeamWithPlayers> {
        self.teams
            .iter()
            .find(|t| t.players.iter().any(|p| p.id == player_id))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// True when a write committed but the follow-up refresh failed
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }
}

/// Join players onto their teams.
///
/// Team order is kept, players are ordered oldest first and `player_count`
/// is recomputed from the joined list. Players whose team is missing are
/// dropped.
pub fn group_players(teams: Vec<Team>, players: Vec<Player>) -> Vec<TeamWithPlayers> {
    let mut by_team: HashMap<Uuid, Vec<Player>> = HashMap::new();
    for player in players {
        by_team.entry(player.team_id).or_default().push(player);
    }

    let grouped: Vec<TeamWithPlayers> = teams
        .into_iter()
        .map(|mut team| {
            let mut players = by_team.remove(&team.id).unwrap_or_default();
            players.sort_by_key(|p| p.created_at);

            let actual = i32::try_from(players.len()).unwrap_or(i32::MAX);
            if team.player_count != actual {
                tracing::debug!(
                    team_id = %team.id,
                    stored = team.player_count,
                    actual,
                    "Recomputed drifted player_count"
                );
                team.player_count = actual;
            }

            TeamWithPlayers { team, players }
        })
        .collect();

    for (team_id, orphans) in by_team {
        tracing::warn!(
            team_id = %team_id,
            count = orphans.len(),
            "Dropping players that reference a missing team"
        );
    }

    grouped
}

/// Teams passing the filter, in their original order
pub fn filter_by_category(teams: &[TeamWithPlayers], filter: CategoryFilter) -> Vec<TeamWithPlayers> {
    teams
        .iter()
        .filter(|t| filter.matches(t.category()))
        .cloned()
        .collect()
}

pub fn count_by_category(teams: &[TeamWithPlayers], category: Category) -> usize {
    teams.iter().filter(|t| t.category() == category).count()
}

/// Headline counts for a roster listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RosterSummary {
    pub total: usize,
    pub men: usize,
    pub women: usize,
}

impl RosterSummary {
    pub fn from_teams(teams: &[TeamWithPlayers]) -> Self {
        Self {
            total: teams.len(),
            men: count_by_category(teams, Category::Men),
            women: count_by_category(teams, Category::Women),
        }
    }
}

/// Set of teams whose rosters are shown expanded in a listing.
///
/// Transitions consume the old set and return the new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandedTeams(BTreeSet<Uuid>);

impl ExpandedTeams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(mut self, team_id: Uuid) -> Self {
        if !self.0.remove(&team_id) {
            self.0.insert(team_id);
        }
        self
    }

    /// Forget teams that are no longer in the snapshot
    pub fn retain_known(mut self, teams: &[TeamWithPlayers]) -> Self {
        self.0.retain(|id| teams.iter().any(|t| t.id() == *id));
        self
    }

    pub fn is_expanded(&self, team_id: Uuid) -> bool {
        self.0.contains(&team_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Uuid> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Uuid> for ExpandedTeams {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn toggle_expansion(expanded: ExpandedTeams, team_id: Uuid) -> ExpandedTeams {
    expanded.toggle(team_id)
}

/// Public read-side of the roster.
///
/// Re-pulls from the store only when a write was signalled since the last
/// load, or when nothing has been loaded yet.
pub struct RosterView {
    cache: RosterCache,
    changes: watch::Receiver<u64>,
    seen: Option<u64>,
}

impl RosterView {
    pub fn new(store: Arc<dyn RosterStore>, changes: watch::Receiver<u64>) -> Self {
        Self {
            cache: RosterCache::new(store),
            changes,
            seen: None,
        }
    }

    pub async fn current(&mut self) -> Result<&[TeamWithPlayers], RepositoryError> {
        let generation = *self.changes.borrow_and_update();
        if !self.cache.is_loaded() || self.seen != Some(generation) {
            self.cache.refresh().await?;
            self.seen = Some(generation);
        }
        Ok(self.cache.teams())
    }
}
