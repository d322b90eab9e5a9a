//! Error taxonomy for chopsticks actions.

use super::types::Player;
use crate::storage::StoreError;

/// Which rule an empty hand broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EmptyHandKind {
    /// The acting hand of a move holds no fingers.
    #[display("Cannot move from an empty hand.")]
    From,
    /// The targeted opponent hand holds no fingers.
    #[display("Cannot move to an empty hand.")]
    To,
    /// The swapping player already has a dead hand.
    #[display("Cannot swap with an empty hand.")]
    Swap,
}

/// Why a swap amount was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SwapErrorKind {
    /// Finger count outside 1-4.
    #[display("Fingers to swap must be between 1 and 4.")]
    Range,
    /// The swap would empty or overdraw the source hand.
    #[display("Cannot swap all / more fingers than you have.")]
    Overdraw,
}

/// Error that can occur when validating or applying an action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Player is not an integer, or not 0 or 1.
    #[display("Player must be an integer, either 0 or 1.")]
    InvalidPlayer,

    /// A valid player acted out of turn.
    #[display("It is player {}'s turn.", current.number())]
    WrongTurn {
        /// The player whose turn it actually is.
        current: Player,
    },

    /// Hand is not "left" or "right".
    #[display("Hand must be 'left' or 'right'")]
    InvalidHand,

    /// Finger count is not an integer.
    #[display("Fingers must be an integer")]
    InvalidInput,

    /// The action touches a hand with no fingers.
    #[display("{}", _0)]
    EmptyHand(EmptyHandKind),

    /// The swap amount is out of range or exceeds the source hand.
    #[display("{}", _0)]
    InvalidSwap(SwapErrorKind),

    /// The storage port failed.
    #[display("{}", _0)]
    Storage(StoreError),
}

impl GameError {
    /// True for rule and input violations the caller can fix.
    ///
    /// Storage failures are the only errors that are not the caller's fault.
    pub fn is_validation(&self) -> bool {
        !matches!(self, GameError::Storage(_))
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        GameError::Storage(err)
    }
}
