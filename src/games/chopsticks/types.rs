//! Core domain types for chopsticks.

use std::str::FromStr;

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::GameError;

/// Finger capacity of a hand. Reaching this count bursts the hand back to 0.
pub const FINGERS: u8 = 5;

/// Fingers on each hand at the start of a game.
pub const STARTING_FINGERS: u8 = 1;

/// Player in the game, addressed externally by index 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Player {
    /// Player at index 0 (moves first).
    #[display("player 1")]
    First,
    /// Player at index 1.
    #[display("player 2")]
    Second,
}

impl Player {
    /// Both players in index order.
    pub const ALL: [Player; 2] = [Player::First, Player::Second];

    /// Returns the zero-based index used on the wire and in storage.
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// Returns the one-based number shown to humans.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// Looks up a player by zero-based index.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Player::First),
            1 => Some(Player::Second),
            _ => None,
        }
    }

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

impl FromStr for Player {
    type Err = GameError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .and_then(Player::from_index)
            .ok_or(GameError::InvalidPlayer)
    }
}

/// One of a player's two hands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Hand {
    /// Left hand.
    Left,
    /// Right hand.
    Right,
}

impl Hand {
    /// Returns the player's other hand.
    pub fn other(self) -> Self {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }

    /// Parses a hand name, reporting [`GameError::InvalidHand`] on failure.
    #[instrument]
    pub fn parse(s: &str) -> Result<Self, GameError> {
        s.parse::<Hand>().map_err(|_| GameError::InvalidHand)
    }
}

/// Finger counts on one player's hands. A count of 0 is a dead hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct HandState {
    /// Fingers on the left hand (0-4).
    pub left: u8,
    /// Fingers on the right hand (0-4).
    pub right: u8,
}

impl HandState {
    /// Hands at the start of a game.
    pub fn starting() -> Self {
        Self::new(STARTING_FINGERS, STARTING_FINGERS)
    }

    /// Returns the finger count on the given hand.
    pub fn get(&self, hand: Hand) -> u8 {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
        }
    }

    /// Sets the finger count on the given hand.
    pub fn set(&mut self, hand: Hand, fingers: u8) {
        match hand {
            Hand::Left => self.left = fingers,
            Hand::Right => self.right = fingers,
        }
    }

    /// True when at least one hand is dead.
    pub fn has_empty_hand(&self) -> bool {
        self.left == 0 || self.right == 0
    }

    /// True when both hands are dead.
    pub fn is_eliminated(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}

impl Default for HandState {
    fn default() -> Self {
        Self::starting()
    }
}

/// Snapshot of both players' hands plus the winner, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Board {
    /// Hands of player index 0.
    pub first: HandState,
    /// Hands of player index 1.
    pub second: HandState,
    /// Winner of the game, if decided.
    pub winner: Option<Player>,
}

impl Board {
    /// Returns the hands of the given player.
    pub fn hands(&self, player: Player) -> HandState {
        match player {
            Player::First => self.first,
            Player::Second => self.second,
        }
    }
}

/// Adds fingers into a hand, bursting back to 0 at capacity.
///
/// Both counts are expected in 0-4; larger inputs are still reduced modulo
/// [`FINGERS`] rather than overflowing.
pub fn add_fingers(current: u8, added: u8) -> u8 {
    let sum = (u16::from(current) + u16::from(added)) % u16::from(FINGERS);
    // Always below FINGERS.
    sum as u8
}
