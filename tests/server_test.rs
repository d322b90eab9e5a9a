//! Tests for the REST routes, driven in-process through the router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use chopsticks::view::BoardState;
use chopsticks::{AppState, ChopsticksGame, MemoryStore, SqliteStore, router};

fn app() -> Router {
    let game = ChopsticksGame::new(Box::new(MemoryStore::new())).expect("Failed to create game");
    router(Arc::new(AppState::new(game)))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("Body is not JSON");
    (status, body)
}

#[tokio::test]
async fn test_health_routes() {
    let app = app();
    for uri in ["/chopsticks/health", "/chopsticks/healthcheck"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "OK"}));
    }
}

#[tokio::test]
async fn test_initial_board_state() {
    let app = app();
    for uri in ["/chopsticks/board_state", "/chopsticks/get_board_state"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "player1_left": 1,
                "player1_right": 1,
                "player2_left": 1,
                "player2_right": 1,
                "winner": -1
            })
        );
    }
}

#[tokio::test]
async fn test_move_returns_board_and_advances_turn() {
    let app = app();

    let (status, body) = get(&app, "/chopsticks/move/0/left/left").await;
    assert_eq!(status, StatusCode::OK);
    let board: BoardState = serde_json::from_value(body).expect("board payload");
    assert_eq!(board.player2_left, 2);
    assert_eq!(board.winner, -1);

    let (status, body) = get(&app, "/chopsticks/current_player").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"player": 1}));

    let (_, body) = get(&app, "/chopsticks/get_current_player").await;
    assert_eq!(body, json!({"player": 1}));
}

#[tokio::test]
async fn test_player_hand() {
    let app = app();
    get(&app, "/chopsticks/move/0/right/left").await;

    let (status, body) = get(&app, "/chopsticks/player_hand/1/left").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"hand": 2}));

    let (status, body) = get(&app, "/chopsticks/get_player_hand/0/right").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"hand": 1}));

    let (status, body) = get(&app, "/chopsticks/player_hand/zero/left").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Player must be an integer, either 0 or 1."})
    );
}

#[tokio::test]
async fn test_wrong_turn_is_bad_request() {
    let app = app();
    let (status, body) = get(&app, "/chopsticks/move/1/left/left").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "It is player 1's turn."}));

    let (_, body) = get(&app, "/chopsticks/current_player").await;
    assert_eq!(body, json!({"player": 0}));
}

#[tokio::test]
async fn test_swap_route() {
    let app = app();

    let (status, body) = get(&app, "/chopsticks/swap/0/left/1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Cannot swap all / more fingers than you have."})
    );

    let (status, body) = get(&app, "/chopsticks/swap/0/left/lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Fingers must be an integer"}));

    // Give player 2 a hand worth swapping, then swap it.
    get(&app, "/chopsticks/move/0/left/left").await;
    let (status, body) = get(&app, "/chopsticks/swap/1/left/1").await;
    assert_eq!(status, StatusCode::OK);
    let board: BoardState = serde_json::from_value(body).expect("board payload");
    assert_eq!((board.player2_left, board.player2_right), (1, 2));
}

#[tokio::test]
async fn test_reset_restores_opening_position() {
    let app = app();
    get(&app, "/chopsticks/move/0/left/left").await;

    let (status, body) = get(&app, "/chopsticks/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Game reset"}));

    let (_, body) = get(&app, "/chopsticks/board_state").await;
    assert_eq!(body["player2_left"], json!(1));
    let (_, body) = get(&app, "/chopsticks/current_player").await;
    assert_eq!(body, json!({"player": 0}));
}

#[tokio::test]
async fn test_cors_headers_present() {
    let app = app();
    let response = app
        .oneshot(
            Request::get("/chopsticks/health")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("Request failed");
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::new(db_path).expect("Failed to create store");
    let game = ChopsticksGame::new(Box::new(store)).expect("Failed to create game");
    let app = router(Arc::new(AppState::new(game)));

    let (status, _) = get(&app, "/chopsticks/board_state").await;
    assert_eq!(status, StatusCode::OK);

    // Replace the database with bytes SQLite cannot open.
    std::fs::write(db_file.path(), vec![0xAB_u8; 4096]).expect("Failed to corrupt database");

    for uri in ["/chopsticks/board_state", "/chopsticks/reset"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert!(body["error"].is_string(), "{uri}: {body}");
    }

    // A move that would be legal still fails on storage, not on the rules.
    let (status, body) = get(&app, "/chopsticks/move/0/left/left").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}
