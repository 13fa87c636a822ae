//! PostgreSQL roster store tests
//!
//! Require a database at `TEST_DATABASE_URL`; run with `cargo test -- --ignored`.

#![allow(dead_code)]

mod common;

use std::sync::Arc;

use sqlx::PgPool;
use torneo_common::RepositoryError;
use torneo_teams::{
    AdminWorkflow, Category, NewTeam, PgRosterStore, RefreshTrigger, RegistrationRequest,
    RegistrationWorkflow, RosterStore, TeamPatch,
};
use uuid::Uuid;

use common::TestConfig;

async fn store() -> anyhow::Result<PgRosterStore> {
    let config = TestConfig::from_env();
    let pool = PgPool::connect(&config.database_url).await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    Ok(PgRosterStore::new(pool))
}

fn unique(name: &str) -> String {
    format!("{name} {}", &Uuid::new_v4().simple().to_string()[..8])
}

#[tokio::test]
#[ignore]
async fn test_batch_insert_preserves_order() -> anyhow::Result<()> {
    let store = store().await?;
    let team = store
        .create_team(NewTeam::new(&unique("Leonas"), "Marta", Category::Women, 3)?)
        .await?;
    let names = vec!["Ana".to_string(), "Beatriz".to_string(), "Clara".to_string()];

    let players = store.create_players(team.id, &names).await?;

    let stored: Vec<String> = store
        .list_players()
        .await?
        .into_iter()
        .filter(|p| p.team_id == team.id)
        .map(|p| p.player_name)
        .collect();
    assert_eq!(stored, names);
    assert!(players.windows(2).all(|w| w[0].created_at < w[1].created_at));

    store.delete_team(team.id).await?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_unknown_rows_are_not_found() -> anyhow::Result<()> {
    let store = store().await?;
    let id = Uuid::new_v4();

    assert_eq!(
        store.update_team(id, TeamPatch::player_count(1)).await,
        Err(RepositoryError::NotFound)
    );
    assert_eq!(store.delete_team(id).await, Err(RepositoryError::NotFound));
    assert_eq!(store.delete_player(id).await, Err(RepositoryError::NotFound));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_player_for_missing_team_is_rejected() -> anyhow::Result<()> {
    let store = store().await?;
    let result = store.create_player(Uuid::new_v4(), "Nadie").await;
    assert!(matches!(result, Err(RepositoryError::Rejected(_))));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_registration_and_admin_round_trip() -> anyhow::Result<()> {
    let store: Arc<dyn RosterStore> = Arc::new(store().await?);
    let trigger = RefreshTrigger::new();
    let registration = RegistrationWorkflow::new(store.clone(), trigger.clone());
    let mut admin = AdminWorkflow::new(store.clone(), trigger);

    let team_name = unique("Halcones");
    let registered = registration
        .register_team(RegistrationRequest {
            category: Category::Men,
            team_name: team_name.clone(),
            person_in_charge: "Luis".to_string(),
            player_names: vec!["Pedro".to_string(), "Juan".to_string()],
        })
        .await?;
    assert_eq!(registered.team.player_count, 2);

    admin.add_player_to_team(registered.id(), "Marcos").await?;
    let cached = admin
        .teams()
        .iter()
        .find(|t| t.id() == registered.id())
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("registered team missing from cache"))?;
    assert_eq!(cached.team.player_count, 3);
    assert_eq!(cached.players.len(), 3);

    admin.delete_team_by_id(registered.id()).await?;
    assert!(admin.teams().iter().all(|t| t.id() != registered.id()));
    Ok(())
}
