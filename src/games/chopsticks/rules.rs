//! Game logic and rules for chopsticks.

use std::num::IntErrorKind;

use tracing::{debug, info, instrument, warn};

use super::error::{EmptyHandKind, GameError, SwapErrorKind};
use super::types::{Board, Hand, HandState, Player, add_fingers};
use crate::storage::HandStore;

/// Smallest number of fingers a swap may move.
const MIN_SWAP: i64 = 1;
/// Largest number of fingers a swap may move.
const MAX_SWAP: i64 = 4;

/// Chopsticks game engine.
///
/// Owns whose turn it is and who has won. Hand counts live behind the
/// [`HandStore`] and are re-read before every mutation, so the engine never
/// holds a stale copy of the board.
///
/// Every action validates fully before its first write. A rejected action
/// leaves the store, the turn and the winner untouched.
#[derive(Debug)]
pub struct ChopsticksGame {
    store: Box<dyn HandStore>,
    current_player: Player,
    winner: Option<Player>,
}

impl ChopsticksGame {
    /// Creates a game on top of the given store and resets it to the opening
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Storage`] if the store cannot be initialized.
    #[instrument(skip(store))]
    pub fn new(store: Box<dyn HandStore>) -> Result<Self, GameError> {
        let mut game = Self {
            store,
            current_player: Player::First,
            winner: None,
        };
        game.initialize()?;
        Ok(game)
    }

    /// Resets both players to one finger per hand, player 1 to move, no winner.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) -> Result<(), GameError> {
        self.store.initialize()?;
        self.current_player = Player::First;
        self.winner = None;
        info!("Game initialized with two players");
        Ok(())
    }

    /// Returns the player allowed to act next.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the winner, if the game has been decided.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Returns the backing store.
    pub fn store(&self) -> &dyn HandStore {
        self.store.as_ref()
    }

    /// Returns the backing store mutably.
    pub fn store_mut(&mut self) -> &mut dyn HandStore {
        self.store.as_mut()
    }

    /// Reads one player's hands through the store.
    #[instrument(skip(self))]
    pub fn hands(&self, player: Player) -> Result<HandState, GameError> {
        debug!(%player, "Retrieving hands");
        Ok(self.store.player(player)?)
    }

    /// Reads both players' hands and the winner.
    #[instrument(skip(self))]
    pub fn board(&self) -> Result<Board, GameError> {
        Ok(Board::new(
            self.hands(Player::First)?,
            self.hands(Player::Second)?,
            self.winner,
        ))
    }

    /// Reads the finger count on one hand, parsing both arguments from text.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPlayer`] or [`GameError::InvalidHand`] for bad input.
    #[instrument(skip(self))]
    pub fn hand(&self, player: &str, hand: &str) -> Result<u8, GameError> {
        let player = player.parse::<Player>()?;
        let hand = Hand::parse(hand)?;
        Ok(self.hands(player)?.get(hand))
    }

    /// Adds the acting player's `from_hand` into the opponent's `to_hand`.
    ///
    /// Returns the winner after the turn passes, if any.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidPlayer`], [`GameError::WrongTurn`] or
    ///   [`GameError::InvalidHand`] for bad input
    /// - [`GameError::EmptyHand`] if either hand involved holds no fingers
    #[instrument(skip(self), fields(current = %self.current_player))]
    pub fn make_move(
        &mut self,
        player: &str,
        from_hand: &str,
        to_hand: &str,
    ) -> Result<Option<Player>, GameError> {
        let player = self.validate_turn(player)?;
        let from_hand = Hand::parse(from_hand).map_err(rejected)?;
        let to_hand = Hand::parse(to_hand).map_err(rejected)?;
        let opponent = player.opponent();

        let added = self.store.player(player)?.get(from_hand);
        if added == 0 {
            return Err(rejected(GameError::EmptyHand(EmptyHandKind::From)));
        }
        let target = self.store.player(opponent)?.get(to_hand);
        if target == 0 {
            return Err(rejected(GameError::EmptyHand(EmptyHandKind::To)));
        }

        let fingers = add_fingers(target, added);
        self.store.set_hand(opponent, to_hand, fingers)?;
        info!(%player, %from_hand, %opponent, %to_hand, fingers, "Move completed");

        self.end_turn()
    }

    /// Moves `fingers` from the acting player's `hand` to their other hand.
    ///
    /// A player with a dead hand cannot swap at all, and a swap can never
    /// empty the source hand.
    ///
    /// Returns the winner after the turn passes, if any.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidPlayer`], [`GameError::WrongTurn`],
    ///   [`GameError::InvalidHand`] or [`GameError::InvalidInput`] for bad input
    /// - [`GameError::EmptyHand`] if the player already has a dead hand
    /// - [`GameError::InvalidSwap`] if `fingers` is outside 1-4 or would
    ///   empty the source hand
    #[instrument(skip(self), fields(current = %self.current_player))]
    pub fn swap(
        &mut self,
        player: &str,
        hand: &str,
        fingers: &str,
    ) -> Result<Option<Player>, GameError> {
        let player = self.validate_turn(player)?;
        let source = Hand::parse(hand).map_err(rejected)?;
        // `None` is an integer too large for i64, still out of swap range.
        let fingers = match fingers.trim().parse::<i64>() {
            Ok(fingers) => Some(fingers),
            Err(err)
                if matches!(
                    err.kind(),
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                ) =>
            {
                None
            }
            Err(_) => return Err(rejected(GameError::InvalidInput)),
        };

        let hands = self.store.player(player)?;
        if hands.has_empty_hand() {
            return Err(rejected(GameError::EmptyHand(EmptyHandKind::Swap)));
        }
        let Some(fingers) = fingers.filter(|n| (MIN_SWAP..=MAX_SWAP).contains(n)) else {
            return Err(rejected(GameError::InvalidSwap(SwapErrorKind::Range)));
        };
        let available = i64::from(hands.get(source));
        if available <= fingers {
            return Err(rejected(GameError::InvalidSwap(SwapErrorKind::Overdraw)));
        }

        // In 1..=3 after the checks above.
        let fingers = fingers as u8;
        let destination = source.other();
        let remaining = hands.get(source) - fingers;
        let received = add_fingers(hands.get(destination), fingers);

        // Two independent writes; the relational store commits each on its own.
        self.store.set_hand(player, source, remaining)?;
        self.store.set_hand(player, destination, received)?;
        info!(%player, %source, fingers, remaining, received, "Swap completed");

        self.end_turn()
    }

    /// Checks that `player` parses to a seat and that it is their turn.
    fn validate_turn(&self, player: &str) -> Result<Player, GameError> {
        let player = player.parse::<Player>().map_err(rejected)?;
        if player != self.current_player {
            return Err(rejected(GameError::WrongTurn {
                current: self.current_player,
            }));
        }
        Ok(player)
    }

    /// Passes the turn to the opponent.
    fn change_player(&mut self) {
        self.current_player = self.current_player.opponent();
        debug!(current = %self.current_player, "Changed current player");
    }

    /// Passes the turn, then checks whether the player now to move is out.
    ///
    /// The check runs on the new current player, and an eliminated player
    /// hands the turn straight back, so the winner recorded is the player
    /// who just acted and the turn stays with them.
    fn end_turn(&mut self) -> Result<Option<Player>, GameError> {
        self.change_player();
        let hands = self.store.player(self.current_player)?;
        if hands.is_eliminated() {
            self.change_player();
            self.winner = Some(self.current_player);
            info!(winner = %self.current_player, "Player has won the game");
        } else {
            debug!("No player has won yet");
        }
        Ok(self.winner)
    }
}

/// Logs a rejected action and passes the error through.
fn rejected(err: GameError) -> GameError {
    warn!(error = %err, "Action rejected");
    err
}
