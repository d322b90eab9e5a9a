//! Relational persistence for player hands.

mod error;
mod models;
mod repository;
mod schema;

pub use error::DbError;
pub use models::PlayerRow;
pub use repository::SqliteStore;
