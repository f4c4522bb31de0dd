//! Game status.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::Player;

/// Lifecycle status of a game.
///
/// The string forms (`in_progress`, `x_wins`, ...) are what the REST
/// surface returns and what the database stores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    /// Moves are still being accepted.
    InProgress,
    /// X completed a line.
    XWins,
    /// O completed a line.
    OWins,
    /// Board filled with no line completed.
    Draw,
    /// Replaced by a newer game before it finished.
    Abandoned,
}

impl GameStatus {
    /// Status for a game won by `player`.
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::X => Self::XWins,
            Player::O => Self::OWins,
        }
    }

    /// Terminal statuses never change again.
    pub fn is_terminal(self) -> bool {
        self != Self::InProgress
    }

    /// Storage and wire form.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
