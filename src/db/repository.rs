//! SQLite-backed hand store.

use diesel::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::db::models::player_id;
use crate::db::{DbError, PlayerRow, schema};
use crate::games::chopsticks::{Hand, HandState, Player};
use crate::storage::{HandStore, StoreError, check_count};

const DROP_PLAYERS: &str = "DROP TABLE IF EXISTS players";

const CREATE_PLAYERS: &str = "CREATE TABLE players (
    player_id INTEGER PRIMARY KEY,
    left_hand INTEGER NOT NULL,
    right_hand INTEGER NOT NULL
)";

/// Hand store persisted in a two-row SQLite table.
///
/// Opens a fresh connection for every call. Each call runs in its own
/// transaction, so the two writes of a swap are committed separately and a
/// crash between them leaves the player's hands half-updated.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Creates a store for the database file at the given path.
    ///
    /// The file is created on first connection. `":memory:"` is not useful
    /// here, since every call gets a new connection and so a new database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path must not be empty"));
        }
        info!(path = %db_path, "Creating SqliteStore");
        Ok(Self { db_path })
    }

    /// Returns the database file path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Drops and recreates the `players` table with both seed rows, in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), DbError> {
        info!("Initializing the database");
        let mut conn = self.connection()?;

        conn.transaction::<_, DbError, _>(|conn| {
            diesel::sql_query(DROP_PLAYERS).execute(conn)?;
            debug!("Dropped existing players table");
            diesel::sql_query(CREATE_PLAYERS).execute(conn)?;
            debug!("Created new players table");
            for player in Player::ALL {
                diesel::insert_into(schema::players::table)
                    .values(PlayerRow::from_hands(player, HandState::starting()))
                    .execute(conn)?;
            }
            debug!("Inserted initial player data");
            Ok(())
        })?;

        info!("Database initialization complete");
        Ok(())
    }

    /// Looks up one player's row. Returns `None` if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or the row holds
    /// out-of-range counts.
    #[instrument(skip(self))]
    pub fn fetch_player(&self, player: Player) -> Result<Option<HandState>, DbError> {
        debug!(%player, "Retrieving player data");
        let mut conn = self.connection()?;

        let row = schema::players::table
            .find(player_id(player))
            .select(PlayerRow::as_select())
            .first(&mut conn)
            .optional()?;

        match row {
            Some(row) => {
                let hands = row.hand_state()?;
                debug!(?hands, "Player data retrieved");
                Ok(Some(hands))
            }
            None => {
                warn!(%player, "No data found for player");
                Ok(None)
            }
        }
    }

    /// Updates a single hand column of one player's row, committed immediately.
    ///
    /// Returns `false` if no row exists for the player.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn update_hand(&self, player: Player, hand: Hand, fingers: u8) -> Result<bool, DbError> {
        debug!("Updating hand");
        let mut conn = self.connection()?;

        let target = schema::players::table.find(player_id(player));
        let fingers = i32::from(fingers);
        let updated = match hand {
            Hand::Left => diesel::update(target)
                .set(schema::players::left_hand.eq(fingers))
                .execute(&mut conn)?,
            Hand::Right => diesel::update(target)
                .set(schema::players::right_hand.eq(fingers))
                .execute(&mut conn)?,
        };

        if updated == 0 {
            warn!(%player, "No row to update");
            return Ok(false);
        }
        info!(%player, %hand, fingers, "Hand updated");
        Ok(true)
    }
}

impl HandStore for SqliteStore {
    fn initialize(&mut self) -> Result<(), StoreError> {
        Ok(self.reset().map_err(|e| e.during("initialize players"))?)
    }

    fn player(&self, player: Player) -> Result<HandState, StoreError> {
        self.fetch_player(player)
            .map_err(|e| e.during("read hands"))?
            .ok_or(StoreError::NotFound(player))
    }

    fn set_hand(&mut self, player: Player, hand: Hand, fingers: u8) -> Result<(), StoreError> {
        check_count(fingers)?;
        let updated = self
            .update_hand(player, hand, fingers)
            .map_err(|e| e.during("update hand"))?;
        if updated {
            Ok(())
        } else {
            Err(StoreError::NotFound(player))
        }
    }
}
