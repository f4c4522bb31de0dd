//! Versus server library - human-vs-bot tic-tac-toe over REST.
//!
//! # Architecture
//!
//! - **Db**: diesel/SQLite storage of games and moves; boards are never
//!   stored, only replayed from moves
//! - **Lifecycle**: single active game, alternating starter, move
//!   validation, bot replies
//! - **Api**: axum routes mapping lifecycle results and errors to JSON
//! - **Config**: TOML file, environment and CLI layering
//!
//! Game rules live in the `versus_tictactoe` crate.
//!
//! # Example
//!
//! ```no_run
//! use versus_server::{AppState, GameRepository, GameService, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let repo = GameRepository::new("tic_tac_toe.db")?;
//! repo.run_migrations()?;
//! let app = router(AppState::new(GameService::with_defaults(repo)), &[]);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod clock;
mod config;
mod db;
mod error;
mod lifecycle;
mod views;

// Crate-level exports - REST surface
pub use api::{ApiError, AppState, ErrorBody, INVALID_PAYLOAD_MESSAGE, MoveRequest, router};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Persistence
pub use db::{DbError, GameRecord, GameRepository, MoveRecord, NewGameRecord, NewMoveRecord, StoreTx};

// Crate-level exports - Lifecycle
pub use clock::{Clock, SystemClock};
pub use error::{GameError, Rejection};
pub use lifecycle::GameService;
pub use views::{
    CHAOS_MESSAGE, CreatedGame, GameDetail, GameSummary, GamesList, MoveHistoryItem, MoveResult,
    MovesList,
};
