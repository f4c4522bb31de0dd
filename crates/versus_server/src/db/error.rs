//! Storage errors.

use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// A storage failure, tagged with the caller that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// What went wrong.
    pub message: String,
    /// Line of the caller.
    pub line: u32,
    /// File of the caller.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error located at the caller.
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

    /// A stored column holds a value the game model does not recognise.
    #[track_caller]
    pub fn invalid_value(table: &str, row: i32, column: &str, value: impl std::fmt::Display) -> Self {
        warn!(table, row, column, %value, "Unrecognised stored value");
        Self::new(format!("{} {} has invalid {}: '{}'", table, row, column, value))
    }

    /// The database at `path` could not be opened.
    #[track_caller]
    pub fn unreachable(path: &str, err: diesel::ConnectionError) -> Self {
        Self::new(format!("Failed to connect to '{}': {}", path, err))
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Query failed: {}", err))
    }
}
