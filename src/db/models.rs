//! Database models for player hands.

use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::chopsticks::{FINGERS, HandState, Player};

/// One row of the `players` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable, Insertable, Getters, new)]
#[diesel(table_name = schema::players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlayerRow {
    /// Player index, 0 or 1.
    player_id: i32,
    /// Fingers on the left hand.
    left_hand: i32,
    /// Fingers on the right hand.
    right_hand: i32,
}

impl PlayerRow {
    /// Builds the row storing `hands` for `player`.
    pub fn from_hands(player: Player, hands: HandState) -> Self {
        Self::new(
            player_id(player),
            i32::from(hands.left),
            i32::from(hands.right),
        )
    }

    /// Converts the stored counts back into a [`HandState`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a stored count is outside 0-4.
    #[instrument(skip(self), fields(player_id = self.player_id))]
    pub fn hand_state(&self) -> Result<HandState, DbError> {
        Ok(HandState::new(
            finger_count(self.left_hand)?,
            finger_count(self.right_hand)?,
        ))
    }
}

/// Primary key used for a player.
pub(crate) fn player_id(player: Player) -> i32 {
    match player {
        Player::First => 0,
        Player::Second => 1,
    }
}

fn finger_count(value: i32) -> Result<u8, DbError> {
    u8::try_from(value)
        .ok()
        .filter(|fingers| *fingers < FINGERS)
        .ok_or_else(|| DbError::new(format!("Stored finger count out of range: {}", value)))
}
