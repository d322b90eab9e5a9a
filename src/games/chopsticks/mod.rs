mod error;
mod rules;
mod types;

pub use error::{EmptyHandKind, GameError, SwapErrorKind};
pub use rules::ChopsticksGame;
pub use types::{Board, FINGERS, Hand, HandState, Player, STARTING_FINGERS, add_fingers};
