//! Admin roster endpoint integration tests
//!
//! - GET/POST /v1/admin/teams
//! - PATCH/DELETE /v1/admin/teams/{id}
//! - POST /v1/admin/teams/{id}/players
//! - PATCH/DELETE /v1/admin/players/{id}

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use torneo_common::RepositoryError;
use torneo_teams::StoreOp;
use uuid::Uuid;

use crate::common::{assertions, TestApp};

async fn create_team(app: &TestApp, name: &str, category: &str) -> Value {
    let (status, body) = app
        .send(
            Method::POST,
            "/v1/admin/teams",
            Some(&app.admin_token()),
            Some(json!({
                "team_name": name,
                "person_in_charge": "Luis",
                "category": category,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn add_player(app: &TestApp, team_id: &str, name: &str) -> (StatusCode, Value) {
    app.send(
        Method::POST,
        &format!("/v1/admin/teams/{team_id}/players"),
        Some(&app.admin_token()),
        Some(json!({ "player_name": name })),
    )
    .await
}

mod test_authorization {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::GET, "/v1/admin/teams", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assertions::assert_error_code(&body, "MISSING_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let app = TestApp::new();
        let (status, body) = app
            .send(
                Method::POST,
                "/v1/admin/teams",
                Some(&app.user_token()),
                Some(json!({
                    "team_name": "Halcones",
                    "person_in_charge": "Luis",
                    "category": "men",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assertions::assert_error_code(&body, "NOT_ADMIN");
        assert_eq!(app.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_forged_token_is_unauthorized() {
        let app = TestApp::new();
        let (status, body) = app
            .send(Method::GET, "/v1/admin/teams", Some("not.a.jwt"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assertions::assert_error_code(&body, "INVALID_TOKEN");
    }
}

mod test_team_management {
    use super::*;

    #[tokio::test]
    async fn test_create_team_manually_has_no_players() {
        let app = TestApp::new();
        let team = create_team(&app, "Halcones", "men").await;
        assert_eq!(team["player_count"], 0);

        let (status, body) = app
            .send(Method::GET, "/v1/admin/teams", Some(&app.admin_token()), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["men"], 1);
        assert_eq!(body["teams"][0]["players"], json!([]));
    }

    #[tokio::test]
    async fn test_edit_team_fields() {
        let app = TestApp::new();
        let team = create_team(&app, "Halcones", "men").await;
        let id = team["id"].as_str().unwrap();

        let (status, _) = app
            .send(
                Method::PATCH,
                &format!("/v1/admin/teams/{id}"),
                Some(&app.admin_token()),
                Some(json!({ "team_name": "Halcones FC" })),
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app
            .send(
                Method::PATCH,
                &format!("/v1/admin/teams/{id}"),
                Some(&app.admin_token()),
                Some(json!({})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assertions::assert_error_code(&body, "VALIDATION_ERROR");

        let stored = &app.store.teams()[0];
        assert_eq!(stored.team_name, "Halcones FC");
        assert_eq!(stored.person_in_charge, "Luis");
    }

    #[tokio::test]
    async fn test_delete_team_cascades() {
        let app = TestApp::new();
        let team = create_team(&app, "Halcones", "men").await;
        let id = team["id"].as_str().unwrap();
        add_player(&app, id, "Pedro").await;

        let (status, _) = app
            .send(
                Method::DELETE,
                &format!("/v1/admin/teams/{id}"),
                Some(&app.admin_token()),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(app.store.teams().is_empty());
        assert!(app.store.players().is_empty());

        let (_, listing) = app.send(Method::GET, "/v1/teams", None, None).await;
        assert_eq!(listing["summary"]["total"], 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_team_is_not_found() {
        let app = TestApp::new();
        create_team(&app, "Halcones", "men").await;

        let (status, body) = app
            .send(
                Method::DELETE,
                &format!("/v1/admin/teams/{}", Uuid::new_v4()),
                Some(&app.admin_token()),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assertions::assert_error_code(&body, "NOT_FOUND");
        assert_eq!(app.store.teams().len(), 1);
    }

    #[tokio::test]
    async fn test_store_outage_is_service_unavailable() {
        let app = TestApp::new();
        app.store.fail_next(
            StoreOp::CreateTeam,
            RepositoryError::Unavailable("connection refused".to_string()),
        );

        let (status, body) = app
            .send(
                Method::POST,
                "/v1/admin/teams",
                Some(&app.admin_token()),
                Some(json!({
                    "team_name": "Halcones",
                    "person_in_charge": "Luis",
                    "category": "men",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assertions::assert_error_code(&body, "STORE_UNAVAILABLE");
    }
}

mod test_player_management {
    use super::*;

    #[tokio::test]
    async fn test_admin_cap_blocks_seventh_player() {
        let app = TestApp::new();
        let team = create_team(&app, "Halcones", "men").await;
        let id = team["id"].as_str().unwrap();

        for i in 1..=6 {
            let (status, _) = add_player(&app, id, &format!("Jugador {i}")).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let writes = app.store.write_count();

        let (status, body) = add_player(&app, id, "Jugador").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assertions::assert_error_code(&body, "ROSTER_LIMIT");
        assert_eq!(app.store.write_count(), writes);
        assert_eq!(app.store.teams()[0].player_count, 6);
    }

    #[tokio::test]
    async fn test_add_player_to_unknown_team() {
        let app = TestApp::new();
        let (status, _) = add_player(&app, &Uuid::new_v4().to_string(), "Pedro").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_count_update_failure_is_reported() {
        let app = TestApp::new();
        let team = create_team(&app, "Halcones", "men").await;
        let id = team["id"].as_str().unwrap();
        app.store.fail_next(
            StoreOp::UpdateTeam,
            RepositoryError::Unavailable("timeout".to_string()),
        );

        let (status, body) = add_player(&app, id, "Pedro").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assertions::assert_error_code(&body, "PARTIALLY_APPLIED");

        // The projection counts the player regardless of the stored counter
        let (_, listing) = app
            .send(Method::GET, "/v1/admin/teams", Some(&app.admin_token()), None)
            .await;
        assert_eq!(listing["teams"][0]["player_count"], 1);
    }

    #[tokio::test]
    async fn test_rename_and_delete_player() {
        let app = TestApp::new();
        let team = create_team(&app, "Halcones", "men").await;
        let id = team["id"].as_str().unwrap();
        let (_, first) = add_player(&app, id, "Pedro").await;
        add_player(&app, id, "Juan").await;
        let player_id = first["id"].as_str().unwrap();

        let (status, _) = app
            .send(
                Method::PATCH,
                &format!("/v1/admin/players/{player_id}"),
                Some(&app.admin_token()),
                Some(json!({ "player_name": "Pedro Gil" })),
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(app.store.players()[0].player_name, "Pedro Gil");

        let (status, _) = app
            .send(
                Method::DELETE,
                &format!("/v1/admin/players/{player_id}"),
                Some(&app.admin_token()),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(app.store.players().len(), 1);
        assert_eq!(app.store.teams()[0].player_count, 1);
    }

    #[tokio::test]
    async fn test_rename_unknown_player() {
        let app = TestApp::new();
        let (status, _) = app
            .send(
                Method::PATCH,
                &format!("/v1/admin/players/{}", Uuid::new_v4()),
                Some(&app.admin_token()),
                Some(json!({ "player_name": "Pedro" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
