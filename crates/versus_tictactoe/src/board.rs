//! Board model rebuilt from move history.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use tracing::{instrument, trace};

use crate::{Coord, Player, derive_player};

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// `"."` for empty, otherwise the player's mark.
    pub fn symbol(self) -> &'static str {
        match self {
            Square::Empty => ".",
            Square::Occupied(player) => player.symbol(),
        }
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// A move as the board sees it: its sequence number and target cell.
///
/// The owner is never stored; it is derived from the number and the
/// game's starting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedMove {
    /// Sequence number, starting at 1.
    pub number: u32,
    /// Target cell.
    pub coord: Coord,
}

impl PlacedMove {
    /// Creates a placed move.
    pub fn new(number: u32, coord: Coord) -> Self {
        Self { number, coord }
    }
}

/// 3×3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replays `moves` onto an empty board.
    ///
    /// Moves must arrive in increasing sequence order; each cell takes the
    /// derived player of the move that targets it.
    #[instrument(skip(moves))]
    pub fn reconstruct(starting: Player, moves: impl IntoIterator<Item = PlacedMove>) -> Self {
        let mut board = Self::new();
        for placed in moves {
            let player = derive_player(starting, placed.number);
            trace!(number = placed.number, coord = %placed.coord, ?player, "Replaying move");
            board.place(placed.coord, player);
        }
        board
    }

    /// Gets the square at `coord`.
    pub fn get(&self, coord: Coord) -> Square {
        self.squares[coord.index()]
    }

    /// Marks `coord` for `player`, overwriting whatever was there.
    pub fn place(&mut self, coord: Coord, player: Player) {
        self.squares[coord.index()] = Square::Occupied(player);
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Square::Empty
    }

    /// All empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        Coord::ALL.into_iter().filter(|c| self.is_empty(*c)).collect()
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Returns a copy with `coord` marked for `player`.
    pub fn with(&self, coord: Coord, player: Player) -> Self {
        let mut next = self.clone();
        next.place(coord, player);
        next
    }

    /// Rows indexed `[y][x]`.
    pub fn rows(&self) -> [[Square; 3]; 3] {
        let s = &self.squares;
        [[s[0], s[1], s[2]], [s[3], s[4], s[5]], [s[6], s[7], s[8]]]
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows = self.rows();
        let mut seq = serializer.serialize_seq(Some(rows.len()))?;
        for row in &rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.rows().iter().enumerate() {
            let line: Vec<&str> = row.iter().map(|s| s.symbol()).collect();
            f.write_str(&line.join("|"))?;
            if y < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
