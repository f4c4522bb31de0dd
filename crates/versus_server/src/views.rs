//! Response shapes returned by the lifecycle operations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use versus_tictactoe::{Board, Coord, GameStatus, Personality, Player};

/// Shown when the chaos bot is in play.
pub const CHAOS_MESSAGE: &str = "You're facing the Chaos Bot!";

/// Result of creating a game.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedGame {
    /// Public game id.
    pub id: String,
    /// Status after the bot's opening move, if any.
    pub status: GameStatus,
    /// Who moved first.
    pub starting_player: Player,
    /// Bot personality for the whole game.
    pub bot_type: Personality,
    /// Board rows indexed `[y][x]`.
    pub board: Board,
    /// Who moves next.
    pub current_turn: Option<Player>,
    /// The bot's opening move.
    pub bot_move: Option<Coord>,
    /// Personality reveal.
    pub message: Option<String>,
}

/// Result of a human move (and the bot's reply).
#[derive(Debug, Clone, Serialize)]
pub struct MoveResult {
    /// Board after both moves.
    pub board: Board,
    /// Status after both moves.
    pub status: GameStatus,
    /// Who moves next, `None` once finished.
    pub current_turn: Option<Player>,
    /// The bot's reply, if the game continued after the human move.
    pub bot_move: Option<Coord>,
    /// Personality reveal.
    pub message: Option<String>,
}

/// One entry in the game history.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    /// Public game id.
    pub id: String,
    /// Current status.
    pub status: GameStatus,
    /// Bot personality.
    pub bot_type: Personality,
    /// Moves played.
    pub move_count: usize,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Final board for finished or abandoned games.
    pub final_board: Option<Board>,
}

/// Game history, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct GamesList {
    /// Summaries.
    pub games: Vec<GameSummary>,
}

/// Full view of one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameDetail {
    /// Public game id.
    pub id: String,
    /// Current status.
    pub status: GameStatus,
    /// Who moved first.
    pub starting_player: Player,
    /// Bot personality.
    pub bot_type: Personality,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Current board.
    pub board: Board,
    /// Who moves next.
    pub current_turn: Option<Player>,
}

/// A move with its derived player.
#[derive(Debug, Clone, Serialize)]
pub struct MoveHistoryItem {
    /// Row id.
    pub id: i32,
    /// Sequence number, from 1.
    pub move_number: u32,
    /// Column.
    pub x: u8,
    /// Row.
    pub y: u8,
    /// Derived owner.
    pub player: Player,
    /// When the move was stored.
    pub created_at: DateTime<Utc>,
}

/// Moves of a game in order.
#[derive(Debug, Clone, Serialize)]
pub struct MovesList {
    /// Public game id.
    pub game_id: String,
    /// Moves in sequence order.
    pub moves: Vec<MoveHistoryItem>,
}
