//! Turn order.

use tracing::instrument;

use crate::{BOT, GameStatus, Player};

/// Starting player for a new game.
///
/// Alternates relative to the previous game's starter; the very first game
/// opens with the bot.
#[instrument]
pub fn choose_starting_player(previous: Option<Player>) -> Player {
    previous.map_or(BOT, Player::opponent)
}

/// Player due to move, or `None` once the game has ended.
#[instrument(level = "trace")]
pub fn current_turn(status: GameStatus, starting: Player, move_count: usize) -> Option<Player> {
    if status != GameStatus::InProgress {
        return None;
    }
    if move_count % 2 == 0 {
        Some(starting)
    } else {
        Some(starting.opponent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_game_starts_with_bot() {
        assert_eq!(choose_starting_player(None), Player::O);
    }

    #[test]
    fn test_starting_player_alternates() {
        assert_eq!(choose_starting_player(Some(Player::O)), Player::X);
        assert_eq!(choose_starting_player(Some(Player::X)), Player::O);
    }

    #[test]
    fn test_current_turn() {
        assert_eq!(current_turn(GameStatus::InProgress, Player::O, 0), Some(Player::O));
        assert_eq!(current_turn(GameStatus::InProgress, Player::O, 1), Some(Player::X));
        assert_eq!(current_turn(GameStatus::InProgress, Player::X, 2), Some(Player::X));
        assert_eq!(current_turn(GameStatus::Draw, Player::X, 9), None);
        assert_eq!(current_turn(GameStatus::Abandoned, Player::X, 3), None);
    }
}
