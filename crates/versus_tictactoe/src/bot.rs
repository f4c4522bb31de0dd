//! Bot move selection.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::{debug, instrument};

use crate::{Board, Coord, Player, check_winner};

/// Probability that a new game gets the chaos bot.
pub const CHAOS_PROBABILITY: f64 = 0.1;

/// Move-selection strategy, drawn once per game and never changed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Personality {
    /// Wins when it can, blocks when it must, otherwise plays randomly.
    Smart,
    /// Always plays a random empty cell.
    Chaos,
}

impl Personality {
    /// Storage and wire form.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Source of randomness for bot decisions.
pub trait Randomness {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Returns `true` with the given probability.
    fn roll(&mut self, probability: f64) -> bool;
}

impl Randomness for StdRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn roll(&mut self, probability: f64) -> bool {
        self.gen_bool(probability)
    }
}

/// Draws the personality for a new game: chaos 10% of the time.
#[instrument(skip(rng))]
pub fn choose_personality(rng: &mut dyn Randomness) -> Personality {
    if rng.roll(CHAOS_PROBABILITY) {
        Personality::Chaos
    } else {
        Personality::Smart
    }
}

/// First empty cell, in row-major order, that completes a line for `player`.
#[instrument(level = "trace", skip(board))]
pub fn find_winning_move(board: &Board, player: Player) -> Option<Coord> {
    board
        .empty_cells()
        .into_iter()
        .find(|cell| check_winner(&board.with(*cell, player)) == Some(player))
}

/// Picks the bot's next cell.
///
/// `Smart` takes a winning cell for `acting` if one exists, otherwise blocks
/// the opponent's winning cell, otherwise plays randomly. `Chaos` always
/// plays randomly. Returns `None` only when the board is full.
#[instrument(skip(board, rng), fields(empty = board.empty_cells().len()))]
pub fn select_move(
    board: &Board,
    personality: Personality,
    acting: Player,
    rng: &mut dyn Randomness,
) -> Option<Coord> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    if personality == Personality::Smart {
        if let Some(cell) = find_winning_move(board, acting) {
            debug!(%cell, "Taking winning cell");
            return Some(cell);
        }
        if let Some(cell) = find_winning_move(board, acting.opponent()) {
            debug!(%cell, "Blocking opponent");
            return Some(cell);
        }
    }

    let cell = empty[rng.pick_index(empty.len())];
    debug!(%cell, "Playing random cell");
    Some(cell)
}
