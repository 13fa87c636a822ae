//! Repository client for teams and players
//!
//! [`RosterStore`] is the boundary to the storage collaborator. Workflows
//! only ever see this trait; [`PgRosterStore`] talks to PostgreSQL and
//! [`MockRosterStore`] keeps everything in memory.

pub mod mock;
pub mod postgres;

use std::sync::Arc;

use sqlx::PgPool;
use torneo_common::{RepositoryError, StoreProvider};
use uuid::Uuid;

use crate::domain::entities::{NewTeam, Player, Team, TeamPatch};

pub use mock::{MockRosterStore, StoreOp};
pub use postgres::PgRosterStore;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, RepositoryError>;

/// CRUD access to the `teams` and `players` tables.
#[async_trait::async_trait]
pub trait RosterStore: Send + Sync {
    /// Insert a team; the store assigns `id` and `created_at`
    async fn create_team(&self, team: NewTeam) -> StoreResult<Team>;

    /// All teams, newest first
    async fn list_teams(&self) -> StoreResult<Vec<Team>>;

    /// Partial update; `NotFound` if the team does not exist
    async fn update_team(&self, id: Uuid, patch: TeamPatch) -> StoreResult<()>;

    /// `NotFound` if the team does not exist
    async fn delete_team(&self, id: Uuid) -> StoreResult<()>;

    async fn create_player(&self, team_id: Uuid, name: &str) -> StoreResult<Player>;

    /// Insert a non-empty batch of players atomically. Creation timestamps
    /// follow the order of `names`.
    async fn create_players(&self, team_id: Uuid, names: &[String]) -> StoreResult<Vec<Player>>;

    /// All players, oldest first
    async fn list_players(&self) -> StoreResult<Vec<Player>>;

    /// `NotFound` if the player does not exist
    async fn update_player(&self, id: Uuid, name: &str) -> StoreResult<()>;

    /// `NotFound` if the player does not exist
    async fn delete_player(&self, id: Uuid) -> StoreResult<()>;

    /// Remove every player of a team, returning how many rows went away
    async fn delete_players_for_team(&self, team_id: Uuid) -> StoreResult<u64>;
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub provider: StoreProvider,
    /// Connection pool; required for the postgres provider
    pub pool: Option<PgPool>,
}

/// Factory for creating RosterStore implementations.
pub struct RosterStoreFactory;

impl RosterStoreFactory {
    /// Create a RosterStore based on configuration.
    pub fn create(config: StoreConfig) -> StoreResult<Arc<dyn RosterStore>> {
        match config.provider {
            StoreProvider::Postgres => {
                let pool = config.pool.ok_or_else(|| {
                    RepositoryError::Unavailable(
                        "a database pool is required for the postgres store provider".to_string(),
                    )
                })?;
                tracing::info!("Creating PostgreSQL roster store");
                Ok(Arc::new(PgRosterStore::new(pool)))
            }
            StoreProvider::Mock => {
                tracing::info!("Creating in-memory roster store");
                Ok(Arc::new(MockRosterStore::new()))
            }
        }
    }
}
