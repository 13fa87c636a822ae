//! Public endpoint integration tests
//!
//! - GET /v1/teams - List teams with summary and expansion state
//! - POST /v1/teams/register - Register a team with its roster

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::common::{assertions, TestApp};

fn registration(category: &str, team_name: &str, players: usize) -> Value {
    let names: Vec<String> = (1..=players).map(|i| format!("Jugador {i}")).collect();
    json!({
        "category": category,
        "team_name": team_name,
        "person_in_charge": "Carlos Ruiz",
        "player_names": names,
    })
}

mod test_register_team {
    use super::*;

    #[tokio::test]
    async fn test_register_returns_created_team() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                Method::POST,
                "/v1/teams/register",
                None,
                Some(json!({
                    "category": "women",
                    "team_name": "Leonas",
                    "person_in_charge": "Marta",
                    "player_names": ["Ana", "Beatriz", "Clara"],
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["team_name"], "Leonas");
        assert_eq!(body["category"], "women");
        assert_eq!(body["player_count"], 3);
        let names: Vec<&str> = body["players"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["player_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Ana", "Beatriz", "Clara"]);
    }

    #[tokio::test]
    async fn test_men_roster_cap() {
        let app = TestApp::new();

        let (status, _) = app
            .send(
                Method::POST,
                "/v1/teams/register",
                None,
                Some(registration("men", "Halcones", 12)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app
            .send(
                Method::POST,
                "/v1/teams/register",
                None,
                Some(registration("men", "Toros", 13)),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assertions::assert_error_code(&body, "ROSTER_LIMIT");
        assert_eq!(app.store.teams().len(), 1);
    }

    #[tokio::test]
    async fn test_women_roster_cap() {
        let app = TestApp::new();

        let (status, _) = app
            .send(
                Method::POST,
                "/v1/teams/register",
                None,
                Some(registration("women", "Leonas", 13)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app
            .send(
                Method::POST,
                "/v1/teams/register",
                None,
                Some(registration("women", "Panteras", 14)),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assertions::assert_error_code(&body, "ROSTER_LIMIT");
        assert_eq!(app.store.teams().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_roster_is_too_few() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                Method::POST,
                "/v1/teams/register",
                None,
                Some(registration("men", "Halcones", 0)),
            )
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assertions::assert_error_code(&body, "ROSTER_LIMIT");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("at least one player"));
        assert_eq!(app.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_player_is_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                Method::POST,
                "/v1/teams/register",
                None,
                Some(json!({
                    "category": "men",
                    "team_name": "Halcones",
                    "person_in_charge": "Luis",
                    "player_names": ["Pedro", "   "],
                })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assertions::assert_error_code(&body, "VALIDATION_ERROR");
        assert_eq!(app.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let app = TestApp::new();

        let (status, _) = app
            .send(
                Method::POST,
                "/v1/teams/register",
                None,
                Some(registration("mixed", "Halcones", 5)),
            )
            .await;

        assert!(status.is_client_error());
        assert_eq!(app.store.write_count(), 0);
    }
}

mod test_list_teams {
    use super::*;

    async fn seeded() -> TestApp {
        let app = TestApp::new();
        for (category, name) in [("men", "Halcones"), ("women", "Leonas"), ("men", "Toros")] {
            let (status, _) = app
                .send(
                    Method::POST,
                    "/v1/teams/register",
                    None,
                    Some(registration(category, name, 2)),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        app
    }

    #[tokio::test]
    async fn test_list_newest_first_with_summary() {
        let app = seeded().await;

        let (status, body) = app.send(Method::GET, "/v1/teams", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], json!({ "total": 3, "men": 2, "women": 1 }));
        let names: Vec<&str> = body["teams"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["team_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Toros", "Leonas", "Halcones"]);
    }

    #[tokio::test]
    async fn test_category_filter_keeps_order() {
        let app = seeded().await;

        let (_, body) = app
            .send(Method::GET, "/v1/teams?category=men", None, None)
            .await;

        let teams = body["teams"].as_array().unwrap();
        assert_eq!(teams.len(), 2);
        assert!(teams.iter().all(|t| t["category"] == "men"));
        assert_eq!(teams[0]["team_name"], "Toros");
        assert_eq!(teams[1]["team_name"], "Halcones");
        // Summary ignores the filter
        assert_eq!(body["summary"]["total"], 3);
    }

    #[tokio::test]
    async fn test_listing_sees_new_registrations() {
        let app = seeded().await;
        let (_, before) = app.send(Method::GET, "/v1/teams", None, None).await;
        assert_eq!(before["teams"].as_array().unwrap().len(), 3);

        app.send(
            Method::POST,
            "/v1/teams/register",
            None,
            Some(registration("women", "Panteras", 1)),
        )
        .await;

        let (_, after) = app.send(Method::GET, "/v1/teams", None, None).await;
        assert_eq!(after["teams"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_toggle_expansion_round_trip() {
        let app = seeded().await;
        let (_, body) = app.send(Method::GET, "/v1/teams", None, None).await;
        let id = body["teams"][0]["id"].as_str().unwrap().to_string();
        let stale = uuid::Uuid::new_v4();

        let (_, expanded) = app
            .send(
                Method::GET,
                &format!("/v1/teams?expanded={stale}&toggle={id}"),
                None,
                None,
            )
            .await;
        assert_eq!(expanded["expanded"], json!([id]));
        assert_eq!(expanded["teams"][0]["expanded"], true);
        assert_eq!(expanded["teams"][1]["expanded"], false);

        let (_, collapsed) = app
            .send(
                Method::GET,
                &format!("/v1/teams?expanded={id}&toggle={id}"),
                None,
                None,
            )
            .await;
        assert_eq!(collapsed["expanded"], json!([]));
    }

    #[tokio::test]
    async fn test_invalid_category_is_bad_request() {
        let app = TestApp::new();
        let (status, body) = app
            .send(Method::GET, "/v1/teams?category=mixed", None, None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assertions::assert_error_code(&body, "VALIDATION_ERROR");
    }
}
