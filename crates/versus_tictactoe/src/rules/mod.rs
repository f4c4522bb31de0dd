//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here knows about persistence
//! or whose turn it is.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use tracing::instrument;

use crate::{Board, GameStatus};

/// Evaluates a board.
///
/// Returns the winner's status if any line is complete, [`GameStatus::Draw`]
/// for a full board with no line, otherwise [`GameStatus::InProgress`].
/// Never returns [`GameStatus::Abandoned`].
#[instrument(level = "debug", skip(board), fields(occupied = board.occupied()))]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        return GameStatus::won_by(winner);
    }
    if is_full(board) {
        return GameStatus::Draw;
    }
    GameStatus::InProgress
}
