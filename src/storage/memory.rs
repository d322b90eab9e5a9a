//! In-process hand store.

use tracing::{debug, instrument};

use super::{HandStore, StoreError, check_count};
use crate::games::chopsticks::{Hand, HandState, Player};

/// Hand store held in process memory.
///
/// Starts in the opening position, so it is usable before the first
/// [`HandStore::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    players: [HandState; 2],
}

impl MemoryStore {
    /// Creates a store with both players at one finger per hand.
    #[instrument]
    pub fn new() -> Self {
        debug!("Creating in-memory store");
        Self {
            players: [HandState::starting(); 2],
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HandStore for MemoryStore {
    #[instrument(skip(self))]
    fn initialize(&mut self) -> Result<(), StoreError> {
        self.players = [HandState::starting(); 2];
        debug!("In-memory store initialized with two players");
        Ok(())
    }

    #[instrument(skip(self))]
    fn player(&self, player: Player) -> Result<HandState, StoreError> {
        let hands = self.players[player.index()];
        debug!(?hands, "Retrieved hands");
        Ok(hands)
    }

    #[instrument(skip(self))]
    fn set_hand(&mut self, player: Player, hand: Hand, fingers: u8) -> Result<(), StoreError> {
        check_count(fingers)?;
        self.players[player.index()].set(hand, fingers);
        debug!("Hand updated");
        Ok(())
    }
}
