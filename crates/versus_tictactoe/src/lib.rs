//! Versus tic-tac-toe core.
//!
//! Pure, deterministic game logic for a human-vs-bot tic-tac-toe server.
//!
//! # Architecture
//!
//! - **Board**: 3×3 grid rebuilt by replaying a game's move history
//! - **Rules**: win/draw/in-progress evaluation over a board
//! - **Bot**: move selection for the `smart` and `chaos` personalities
//! - **Turns**: derived players, whose turn it is, who starts next
//!
//! Nothing in this crate performs I/O. Randomness enters through the
//! [`Randomness`] trait so callers can inject a seeded or scripted source.
//!
//! # Example
//!
//! ```
//! use versus_tictactoe::{Board, Coord, GameStatus, PlacedMove, Player, evaluate};
//!
//! let moves = [
//!     PlacedMove::new(1, Coord::at(0, 0)),
//!     PlacedMove::new(2, Coord::at(1, 1)),
//!     PlacedMove::new(3, Coord::at(0, 1)),
//!     PlacedMove::new(4, Coord::at(2, 2)),
//!     PlacedMove::new(5, Coord::at(0, 2)),
//! ];
//! let board = Board::reconstruct(Player::X, moves);
//! assert_eq!(evaluate(&board), GameStatus::XWins);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod bot;
mod coord;
mod player;
mod rules;
mod status;
mod turn;

pub use board::{Board, PlacedMove, Square};
pub use bot::{CHAOS_PROBABILITY, Personality, Randomness, choose_personality, find_winning_move, select_move};
pub use coord::Coord;
pub use player::{BOT, HUMAN, Player, derive_player};
pub use rules::{LINES, check_winner, evaluate, is_full};
pub use status::GameStatus;
pub use turn::{choose_starting_player, current_turn};
