//! Mock Roster Store Implementation
//!
//! Keeps teams and players in memory for tests and database-less local runs.
//! Thread-safe via `Arc<Mutex<>>`. Timestamps advance one microsecond per
//! insert so ordering is deterministic, and any operation can be told to
//! fail once for failure-path tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use torneo_common::RepositoryError;
use uuid::Uuid;

use super::{RosterStore, StoreResult};
use crate::domain::entities::{NewTeam, Player, Team, TeamPatch};

/// Store operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    CreateTeam,
    ListTeams,
    UpdateTeam,
    DeleteTeam,
    CreatePlayer,
    CreatePlayers,
    ListPlayers,
    UpdatePlayer,
    DeletePlayer,
    DeletePlayersForTeam,
}

#[derive(Debug)]
struct State {
    teams: Vec<Team>,
    players: Vec<Player>,
    epoch: DateTime<Utc>,
    ticks: i64,
    writes: usize,
    failures: HashMap<StoreOp, RepositoryError>,
}

impl State {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        self.epoch + Duration::microseconds(self.ticks)
    }

    fn team_exists(&self, id: Uuid) -> bool {
        self.teams.iter().any(|t| t.id == id)
    }
}

/// In-memory roster store
#[derive(Debug, Clone)]
pub struct MockRosterStore {
    state: Arc<Mutex<State>>,
}

impl MockRosterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                teams: Vec::new(),
                players: Vec::new(),
                epoch: Utc::now(),
                ticks: 0,
                writes: 0,
                failures: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| RepositoryError::Unavailable(format!("store lock poisoned: {e}")))
    }

    /// Lock, consume a pending failure for `op`, and count the call if it writes.
    fn begin(&self, op: StoreOp, writes: bool) -> StoreResult<MutexGuard<'_, State>> {
        let mut state = self.lock()?;
        if writes {
            state.writes += 1;
        }
        if let Some(err) = state.failures.remove(&op) {
            tracing::debug!(?op, error = %err, "Mock store: injected failure");
            return Err(err);
        }
        Ok(state)
    }

    /// Make the next call of `op` fail with `err`
    pub fn fail_next(&self, op: StoreOp, err: RepositoryError) {
        if let Ok(mut state) = self.lock() {
            state.failures.insert(op, err);
        }
    }

    /// Number of write operations issued so far, successful or not
    pub fn write_count(&self) -> usize {
        self.lock().map(|s| s.writes).unwrap_or_default()
    }

    /// Raw team rows, insertion order
    pub fn teams(&self) -> Vec<Team> {
        self.lock().map(|s| s.teams.clone()).unwrap_or_default()
    }

    /// Raw player rows, insertion order
    pub fn players(&self) -> Vec<Player> {
        self.lock().map(|s| s.players.clone()).unwrap_or_default()
    }
}

impl Default for MockRosterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RosterStore for MockRosterStore {
    async fn create_team(&self, team: NewTeam) -> StoreResult<Team> {
        let mut state = self.begin(StoreOp::CreateTeam, true)?;
        let created = Team {
            id: Uuid::new_v4(),
            team_name: team.team_name,
            person_in_charge: team.person_in_charge,
            category: team.category,
            player_count: team.player_count,
            created_at: state.next_timestamp(),
        };
        state.teams.push(created.clone());
        Ok(created)
    }

    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        let state = self.begin(StoreOp::ListTeams, false)?;
        let mut teams = state.teams.clone();
        teams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(teams)
    }

    async fn update_team(&self, id: Uuid, patch: TeamPatch) -> StoreResult<()> {
        let mut state = self.begin(StoreOp::UpdateTeam, true)?;
        let team = state
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = patch.team_name {
            team.team_name = name;
        }
        if let Some(person) = patch.person_in_charge {
            team.person_in_charge = person;
        }
        if let Some(count) = patch.player_count {
            if count < 0 {
                return Err(RepositoryError::Rejected(
                    "player_count must be non-negative".to_string(),
                ));
            }
            team.player_count = count;
        }
        Ok(())
    }

    async fn delete_team(&self, id: Uuid) -> StoreResult<()> {
        let mut state = self.begin(StoreOp::DeleteTeam, true)?;
        let before = state.teams.len();
        state.teams.retain(|t| t.id != id);
        if state.teams.len() == before {
            return Err(RepositoryError::NotFound);
        }
        // Mirrors ON DELETE CASCADE on players.team_id
        state.players.retain(|p| p.team_id != id);
        Ok(())
    }

    async fn create_player(&self, team_id: Uuid, name: &str) -> StoreResult<Player> {
        let mut state = self.begin(StoreOp::CreatePlayer, true)?;
        if !state.team_exists(team_id) {
            return Err(RepositoryError::Rejected(format!(
                "team {team_id} does not exist"
            )));
        }
        let player = Player {
            id: Uuid::new_v4(),
            team_id,
            player_name: name.to_string(),
            created_at: state.next_timestamp(),
        };
        state.players.push(player.clone());
        Ok(player)
    }

    async fn create_players(&self, team_id: Uuid, names: &[String]) -> StoreResult<Vec<Player>> {
        let mut state = self.begin(StoreOp::CreatePlayers, true)?;
        if names.is_empty() {
            return Err(RepositoryError::Rejected(
                "player batch must not be empty".to_string(),
            ));
        }
        if !state.team_exists(team_id) {
            return Err(RepositoryError::Rejected(format!(
                "team {team_id} does not exist"
            )));
        }

        let mut created = Vec::with_capacity(names.len());
        for name in names {
            created.push(Player {
                id: Uuid::new_v4(),
                team_id,
                player_name: name.clone(),
                created_at: state.next_timestamp(),
            });
        }
        state.players.extend(created.iter().cloned());
        Ok(created)
    }

    async fn list_players(&self) -> StoreResult<Vec<Player>> {
        let state = self.begin(StoreOp::ListPlayers, false)?;
        let mut players = state.players.clone();
        players.sort_by_key(|p| p.created_at);
        Ok(players)
    }

    async fn update_player(&self, id: Uuid, name: &str) -> StoreResult<()> {
        let mut state = self.begin(StoreOp::UpdatePlayer, true)?;
        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        player.player_name = name.to_string();
        Ok(())
    }

    async fn delete_player(&self, id: Uuid) -> StoreResult<()> {
        let mut state = self.begin(StoreOp::DeletePlayer, true)?;
        let before = state.players.len();
        state.players.retain(|p| p.id != id);
        if state.players.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_players_for_team(&self, team_id: Uuid) -> StoreResult<u64> {
        let mut state = self.begin(StoreOp::DeletePlayersForTeam, true)?;
        let before = state.players.len();
        state.players.retain(|p| p.team_id != team_id);
        Ok((before - state.players.len()) as u64)
    }
}
