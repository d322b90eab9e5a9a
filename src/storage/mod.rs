//! Storage port for player hand state.
//!
//! The engine reads and writes hands only through [`HandStore`]. Which
//! implementation backs it is fixed when the store is opened.

mod memory;

pub use memory::MemoryStore;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::db::{DbError, SqliteStore};
use crate::games::chopsticks::{FINGERS, Hand, HandState, Player};

/// Read/write access to both players' hands.
///
/// Implementations hold exactly two records, one per [`Player`].
pub trait HandStore: std::fmt::Debug + Send {
    /// Resets both players to the opening position.
    fn initialize(&mut self) -> Result<(), StoreError>;

    /// Returns a snapshot of one player's hands.
    fn player(&self, player: Player) -> Result<HandState, StoreError>;

    /// Overwrites the finger count of one hand.
    ///
    /// Counts of [`FINGERS`] or more are refused with
    /// [`StoreError::OutOfRange`] and nothing is written.
    fn set_hand(&mut self, player: Player, hand: Hand, fingers: u8) -> Result<(), StoreError>;
}

/// Storage port failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StoreError {
    /// No record exists for the player.
    #[display("No hand state stored for {}", _0)]
    NotFound(Player),

    /// A hand can only hold 0-4 fingers.
    #[display("Finger count out of range: {}", _0)]
    OutOfRange(u8),

    /// The database rejected the operation.
    #[display("{}", _0)]
    Database(DbError),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            StoreError::NotFound(_) | StoreError::OutOfRange(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::Database(err)
    }
}

/// Rejects finger counts a hand cannot hold.
pub(crate) fn check_count(fingers: u8) -> Result<(), StoreError> {
    if fingers < FINGERS {
        Ok(())
    } else {
        Err(StoreError::OutOfRange(fingers))
    }
}

/// Registered storage implementations, selected by identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on exit.
    #[default]
    #[serde(alias = "passthrough")]
    #[strum(to_string = "memory", serialize = "passthrough")]
    Memory,
    /// SQLite database file.
    #[strum(to_string = "sqlite")]
    Sqlite,
}

/// Opens the selected store and returns it behind the port.
///
/// `db_path` is only read by [`StorageBackend::Sqlite`].
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the SQLite store cannot be created.
#[instrument]
pub fn open_store(backend: StorageBackend, db_path: &str) -> Result<Box<dyn HandStore>, StoreError> {
    info!(%backend, "Opening hand store");
    match backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StorageBackend::Sqlite => Ok(Box::new(SqliteStore::new(db_path.to_string())?)),
    }
}
