//! Database error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Hand store database failure, with the source location that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Hand store database error: {} ({}:{})", message, file, line)]
pub struct DbError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new database error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Prefixes the message with the store operation that failed.
    pub fn during(mut self, operation: &str) -> Self {
        self.message = format!("{}: {}", operation, self.message);
        self
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("query failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("connection failed: {}", err))
    }
}
