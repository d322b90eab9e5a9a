//! REST interface for the chopsticks game.
//!
//! Every route is a `GET` under `/chopsticks`. Path segments are passed to the
//! engine as raw text; the engine does all parsing and validation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

use crate::games::chopsticks::ChopsticksGame;
use crate::view::{self, BoardState, CurrentPlayer, Health, HandCount, Outcome, StatusMessage};

/// Shared state for request handlers.
///
/// The engine assumes a single writer, so every request takes the lock for
/// the whole engine call.
#[derive(Debug)]
pub struct AppState {
    game: Mutex<ChopsticksGame>,
}

impl AppState {
    /// Wraps a game for sharing across requests.
    #[instrument(skip(game))]
    pub fn new(game: ChopsticksGame) -> Self {
        info!("Creating AppState");
        Self {
            game: Mutex::new(game),
        }
    }

    /// Locks the game. A poisoned lock is recovered, since every engine
    /// action validates before it writes.
    pub fn game(&self) -> MutexGuard<'_, ChopsticksGame> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Success(payload) => (StatusCode::OK, Json(payload)).into_response(),
            Outcome::Failure { body, rejected } => {
                let status = if rejected {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Builds the router with CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chopsticks/health", get(health))
        .route("/chopsticks/healthcheck", get(health))
        .route("/chopsticks/board_state", get(board_state))
        .route("/chopsticks/get_board_state", get(board_state))
        .route("/chopsticks/current_player", get(current_player))
        .route("/chopsticks/get_current_player", get(current_player))
        .route("/chopsticks/player_hand/{player}/{hand}", get(player_hand))
        .route("/chopsticks/get_player_hand/{player}/{hand}", get(player_hand))
        .route("/chopsticks/move/{player}/{from_hand}/{to_hand}", get(make_move))
        .route("/chopsticks/swap/{player}/{hand}/{fingers}", get(swap))
        .route("/chopsticks/reset", get(reset))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `host:port` and serves until the process exits.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip(state))]
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Server ready at http://{}:{}/chopsticks", host, port);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[instrument]
async fn health() -> Json<Health> {
    info!("Health check");
    Json(view::health())
}

#[instrument(skip(state))]
async fn board_state(State(state): State<Arc<AppState>>) -> Outcome<BoardState> {
    info!("Get board state");
    let game = state.game();
    Outcome::from_result(game.board(), |board| view::board_state(&board))
}

#[instrument(skip(state))]
async fn current_player(State(state): State<Arc<AppState>>) -> Json<CurrentPlayer> {
    info!("Get current player");
    let player = state.game().current_player();
    Json(view::current_player(player))
}

#[instrument(skip(state))]
async fn player_hand(
    State(state): State<Arc<AppState>>,
    Path((player, hand)): Path<(String, String)>,
) -> Outcome<HandCount> {
    info!("Get player hand");
    let game = state.game();
    Outcome::from_result(game.hand(&player, &hand), view::hand)
}

#[instrument(skip(state))]
async fn make_move(
    State(state): State<Arc<AppState>>,
    Path((player, from_hand, to_hand)): Path<(String, String, String)>,
) -> Outcome<BoardState> {
    info!("Make move");
    let mut game = state.game();
    let result = game
        .make_move(&player, &from_hand, &to_hand)
        .and_then(|_| game.board());
    Outcome::from_result(result, |board| view::board_state(&board))
}

#[instrument(skip(state))]
async fn swap(
    State(state): State<Arc<AppState>>,
    Path((player, hand, fingers)): Path<(String, String, String)>,
) -> Outcome<BoardState> {
    info!("Swap fingers");
    let mut game = state.game();
    let result = game
        .swap(&player, &hand, &fingers)
        .and_then(|_| game.board());
    Outcome::from_result(result, |board| view::board_state(&board))
}

#[instrument(skip(state))]
async fn reset(State(state): State<Arc<AppState>>) -> Outcome<StatusMessage> {
    info!("Reset game");
    let mut game = state.game();
    Outcome::from_result(game.initialize(), |()| view::message("Game reset"))
}
