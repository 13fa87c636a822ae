//! PostgreSQL roster store
//!
//! Runtime `sqlx::query_as` against the `teams` and `players` tables; ids and
//! timestamps come from column defaults.

use sqlx::PgPool;
use torneo_common::RepositoryError;
use uuid::Uuid;

use super::{RosterStore, StoreResult};
use crate::domain::entities::{NewTeam, Player, Team, TeamPatch};

#[derive(Clone)]
pub struct PgRosterStore {
    pool: PgPool,
}

impl PgRosterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn expect_row(rows_affected: u64) -> StoreResult<()> {
    if rows_affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

#[async_trait::async_trait]
impl RosterStore for PgRosterStore {
    async fn create_team(&self, team: NewTeam) -> StoreResult<Team> {
        let created = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (team_name, person_in_charge, category, player_count)
            VALUES ($1, $2, $3, $4)
            RETURNING id, team_name, person_in_charge, category, player_count, created_at
            "#,
        )
        .bind(&team.team_name)
        .bind(&team.person_in_charge)
        .bind(team.category)
        .bind(team.player_count)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, team_name, person_in_charge, category, player_count, created_at
            FROM teams
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    async fn update_team(&self, id: Uuid, patch: TeamPatch) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE teams SET
                team_name = COALESCE($2, team_name),
                person_in_charge = COALESCE($3, person_in_charge),
                player_count = COALESCE($4, player_count)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.team_name)
        .bind(patch.person_in_charge)
        .bind(patch.player_count)
        .execute(&self.pool)
        .await?;

        expect_row(result.rows_affected())
    }

    async fn delete_team(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        expect_row(result.rows_affected())
    }

    async fn create_player(&self, team_id: Uuid, name: &str) -> StoreResult<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (team_id, player_name)
            VALUES ($1, $2)
            RETURNING id, team_id, player_name, created_at
            "#,
        )
        .bind(team_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(player)
    }

    async fn create_players(&self, team_id: Uuid, names: &[String]) -> StoreResult<Vec<Player>> {
        if names.is_empty() {
            return Err(RepositoryError::Rejected(
                "player batch must not be empty".to_string(),
            ));
        }

        // One statement, so the batch commits or fails as a whole. Offsetting
        // by ordinality keeps created_at in input order within the batch.
        let mut players = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (team_id, player_name, created_at)
            SELECT $1, input.player_name, NOW() + input.position::float8 * INTERVAL '1 microsecond'
            FROM UNNEST($2::text[]) WITH ORDINALITY AS input(player_name, position)
            RETURNING id, team_id, player_name, created_at
            "#,
        )
        .bind(team_id)
        .bind(names.to_vec())
        .fetch_all(&self.pool)
        .await?;

        players.sort_by_key(|p| p.created_at);
        Ok(players)
    }

    async fn list_players(&self) -> StoreResult<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r#"
            SELECT id, team_id, player_name, created_at
            FROM players
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn update_player(&self, id: Uuid, name: &str) -> StoreResult<()> {
        let result = sqlx::query("UPDATE players SET player_name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        expect_row(result.rows_affected())
    }

    async fn delete_player(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        expect_row(result.rows_affected())
    }

    async fn delete_players_for_team(&self, team_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM players WHERE team_id = $1")
            .bind(team_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
