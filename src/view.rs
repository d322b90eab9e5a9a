//! Result formatting for engine outputs.
//!
//! Maps engine values and errors to plain serializable payloads. Nothing here
//! knows about HTTP; the transport decides how a [`Outcome::Failure`] is
//! delivered.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::games::chopsticks::{Board, GameError, Player};

/// Wire value for "no winner yet".
pub const NO_WINNER: i8 = -1;

/// Both players' hands and the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Player index 0, left hand.
    pub player1_left: u8,
    /// Player index 0, right hand.
    pub player1_right: u8,
    /// Player index 1, left hand.
    pub player2_left: u8,
    /// Player index 1, right hand.
    pub player2_right: u8,
    /// Winner index, or -1.
    pub winner: i8,
}

/// The player allowed to act next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPlayer {
    /// Player index.
    pub player: u8,
}

/// Finger count on one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandCount {
    /// Finger count.
    pub hand: u8,
}

/// Free-form acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Message text.
    pub message: String,
}

/// Readiness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always `"OK"` when the service answers.
    pub status: String,
}

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub error: String,
}

/// A formatted result, tagged success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The action succeeded.
    Success(T),
    /// The action failed.
    Failure {
        /// Payload describing the failure.
        body: ErrorBody,
        /// True when the caller sent an invalid action, false for
        /// storage faults.
        rejected: bool,
    },
}

impl<T> Outcome<T> {
    /// Formats an engine result, mapping the success value with `format`.
    pub fn from_result<U>(result: Result<U, GameError>, format: impl FnOnce(U) -> T) -> Self {
        match result {
            Ok(value) => Outcome::Success(format(value)),
            Err(err) => Outcome::Failure {
                body: error(&err),
                rejected: err.is_validation(),
            },
        }
    }

    /// True for [`Outcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Encodes an optional winner as its index, or -1.
pub fn winner_index(winner: Option<Player>) -> i8 {
    match winner {
        Some(Player::First) => 0,
        Some(Player::Second) => 1,
        None => NO_WINNER,
    }
}

/// Formats a board snapshot.
#[instrument]
pub fn board_state(board: &Board) -> BoardState {
    let state = BoardState {
        player1_left: board.first.left,
        player1_right: board.first.right,
        player2_left: board.second.left,
        player2_right: board.second.right,
        winner: winner_index(board.winner),
    };
    debug!(?state, "Board state formatted");
    state
}

/// Formats the current player.
pub fn current_player(player: Player) -> CurrentPlayer {
    CurrentPlayer {
        player: player.index() as u8,
    }
}

/// Formats a single hand count.
pub fn hand(fingers: u8) -> HandCount {
    HandCount { hand: fingers }
}

/// Formats an acknowledgement message.
pub fn message(text: impl Into<String>) -> StatusMessage {
    StatusMessage {
        message: text.into(),
    }
}

/// Formats the readiness report.
pub fn health() -> Health {
    Health {
        status: "OK".to_string(),
    }
}

/// Formats an engine error.
#[instrument]
pub fn error(err: &GameError) -> ErrorBody {
    warn!(error = %err, "Error returned");
    ErrorBody {
        error: err.to_string(),
    }
}
