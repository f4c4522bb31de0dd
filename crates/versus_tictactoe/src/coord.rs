//! Board coordinates.

use serde::{Deserialize, Serialize};

/// A cell on the 3×3 grid. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column, 0..=2.
    pub x: u8,
    /// Row, 0..=2.
    pub y: u8,
}

impl Coord {
    /// All nine cells in row-major order.
    pub const ALL: [Coord; 9] = [
        Coord::at(0, 0),
        Coord::at(1, 0),
        Coord::at(2, 0),
        Coord::at(0, 1),
        Coord::at(1, 1),
        Coord::at(2, 1),
        Coord::at(0, 2),
        Coord::at(1, 2),
        Coord::at(2, 2),
    ];

    /// Builds a coordinate from raw request values.
    ///
    /// Returns `None` unless both values are in `0..=2`.
    pub fn new(x: i64, y: i64) -> Option<Self> {
        let in_range = |v: i64| (0..=2).contains(&v);
        if in_range(x) && in_range(y) {
            Some(Self::at(x as u8, y as u8))
        } else {
            None
        }
    }

    /// Builds a coordinate known to be on the board.
    ///
    /// # Panics
    ///
    /// Panics if either value is greater than 2.
    pub const fn at(x: u8, y: u8) -> Self {
        assert!(x < 3 && y < 3, "coordinate outside the 3x3 grid");
        Self { x, y }
    }

    /// Row-major index, `y * 3 + x`.
    pub fn index(self) -> usize {
        self.y as usize * 3 + self.x as usize
    }

    /// Inverse of [`Coord::index`]. Returns `None` for indices past 8.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
