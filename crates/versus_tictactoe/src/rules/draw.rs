//! Draw detection logic for tic-tac-toe.

use tracing::instrument;

use crate::Board;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
#[instrument(level = "trace", skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.empty_cells().is_empty()
}
