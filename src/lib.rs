//! Chopsticks - the two-player finger game behind a REST API.
//!
//! # Architecture
//!
//! - **Games**: the rules engine ([`ChopsticksGame`])
//! - **Storage**: the [`HandStore`] port with in-memory and SQLite backends
//! - **View**: transport-agnostic result formatting
//! - **Server**: axum routes over a shared engine
//!
//! # Example
//!
//! ```
//! use chopsticks::{ChopsticksGame, MemoryStore, Player};
//!
//! # fn example() -> Result<(), chopsticks::GameError> {
//! let mut game = ChopsticksGame::new(Box::new(MemoryStore::new()))?;
//! let winner = game.make_move("0", "left", "left")?;
//! assert_eq!(winner, None);
//! assert_eq!(game.hands(Player::Second)?.left, 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod server;
mod storage;

pub mod cli;
pub mod terminal;
pub mod view;

// Crate-level exports - Game types
pub use games::chopsticks::{
    Board, ChopsticksGame, EmptyHandKind, FINGERS, GameError, Hand, HandState, Player,
    STARTING_FINGERS, SwapErrorKind, add_fingers,
};

// Crate-level exports - Storage
pub use db::{DbError, PlayerRow, SqliteStore};
pub use storage::{HandStore, MemoryStore, StorageBackend, StoreError, open_store};

// Crate-level exports - Configuration
pub use config::{ConfigError, ENV_DB_PATH, ENV_HOST, ENV_PORT, ENV_STORAGE, ServerConfig};

// Crate-level exports - HTTP server
pub use server::{AppState, router, serve};
