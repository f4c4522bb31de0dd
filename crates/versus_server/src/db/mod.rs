//! Database persistence layer for games and their moves.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{GameRecord, MoveRecord, NewGameRecord, NewMoveRecord};
pub use repository::{GameRepository, StoreTx};
