//! Game lifecycle errors.

use derive_more::{Display, Error, From};
use versus_tictactoe::Coord;

use crate::db::DbError;

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    /// The game is no longer in progress.
    #[display("This game has already finished.")]
    GameFinished,
    /// A coordinate is outside 0-2.
    #[display("Coordinates must be in range 0-2 for both x and y.")]
    OutOfBounds,
    /// It is the bot's move.
    #[display("Please wait for the bot to move.")]
    NotYourTurn,
    /// The cell is already taken.
    #[display("That cell is already taken. Try another move.")]
    CellOccupied,
}

impl Rejection {
    /// Machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::GameFinished => "game_finished",
            Self::OutOfBounds => "out_of_bounds",
            Self::NotYourTurn => "not_your_turn",
            Self::CellOccupied => "cell_occupied",
        }
    }
}

/// Errors from game lifecycle operations.
#[derive(Debug, Display, Error, From)]
pub enum GameError {
    /// No game has the requested id.
    #[display("Game not found.")]
    GameNotFound,
    /// No game is currently in progress.
    #[display("No in-progress game found.")]
    NoActiveGame,
    /// The move was refused; `valid_moves` lists the empty cells before it.
    #[display("{reason}")]
    Rejected {
        /// Why the move was refused.
        reason: Rejection,
        /// Empty cells at the time of the request.
        valid_moves: Vec<Coord>,
    },
    /// The store failed.
    #[display("{_0}")]
    #[from]
    Storage(DbError),
    /// Stored data breaks a game invariant.
    #[display("Inconsistent game state: {_0}")]
    Inconsistent(#[error(not(source))] String),
}

impl GameError {
    /// Rejection carrying the current empty cells.
    pub fn rejected(reason: Rejection, valid_moves: Vec<Coord>) -> Self {
        Self::Rejected { reason, valid_moves }
    }

    /// Machine-readable code for client errors, `None` for server faults.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::GameNotFound | Self::NoActiveGame => Some("game_not_found"),
            Self::Rejected { reason, .. } => Some(reason.code()),
            Self::Storage(_) | Self::Inconsistent(_) => None,
        }
    }
}

impl From<diesel::result::Error> for GameError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(DbError::from(err))
    }
}
