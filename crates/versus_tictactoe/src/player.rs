//! Players and derived move ownership.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::instrument;

/// A mark on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
pub enum Player {
    /// The human player.
    X,
    /// The bot.
    O,
}

/// The human always plays X.
pub const HUMAN: Player = Player::X;

/// The bot always plays O.
pub const BOT: Player = Player::O;

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Text symbol used on rendered boards.
    pub fn symbol(self) -> &'static str {
        self.into()
    }
}

/// Computes who made move `move_number` in a game opened by `starting`.
///
/// Odd move numbers belong to the starting player, even ones to the
/// opponent. Move numbers start at 1.
#[instrument(level = "trace")]
pub fn derive_player(starting: Player, move_number: u32) -> Player {
    if move_number % 2 == 1 {
        starting
    } else {
        starting.opponent()
    }
}
