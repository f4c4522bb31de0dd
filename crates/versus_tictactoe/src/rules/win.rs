//! Win detection logic for tic-tac-toe.

use tracing::instrument;

use crate::{Board, Coord, Player, Square};

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [[Coord; 3]; 8] = [
    // Rows
    [Coord::at(0, 0), Coord::at(1, 0), Coord::at(2, 0)],
    [Coord::at(0, 1), Coord::at(1, 1), Coord::at(2, 1)],
    [Coord::at(0, 2), Coord::at(1, 2), Coord::at(2, 2)],
    // Columns
    [Coord::at(0, 0), Coord::at(0, 1), Coord::at(0, 2)],
    [Coord::at(1, 0), Coord::at(1, 1), Coord::at(1, 2)],
    [Coord::at(2, 0), Coord::at(2, 1), Coord::at(2, 2)],
    // Diagonals
    [Coord::at(0, 0), Coord::at(1, 1), Coord::at(2, 2)],
    [Coord::at(2, 0), Coord::at(1, 1), Coord::at(0, 2)],
];

/// Checks if there is a winner on the board.
///
/// Returns the owner of the first complete line in [`LINES`] order,
/// `None` otherwise.
#[instrument(level = "trace", skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|[a, b, c]| {
        let sq = board.get(*a);
        match sq {
            Square::Occupied(player) if sq == board.get(*b) && sq == board.get(*c) => Some(player),
            _ => None,
        }
    })
}
