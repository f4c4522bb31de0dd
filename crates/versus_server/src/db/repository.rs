//! Database repository for games and moves.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};
use versus_tictactoe::GameStatus;

use crate::db::{DbError, GameRecord, MoveRecord, NewGameRecord, NewMoveRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on another writer's lock before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Database repository for game operations.
///
/// Connections are opened per unit of work. Writes go through
/// [`GameRepository::write`], which holds SQLite's write lock for the whole
/// closure so concurrent handlers never interleave their check-then-act
/// sequences.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// A leading `sqlite://` is stripped so URL-style values work too.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path))]
    pub fn new(db_path: impl Into<String>) -> Result<Self, DbError> {
        let raw = db_path.into();
        let db_path = raw.strip_prefix("sqlite://").unwrap_or(&raw).to_string();
        if db_path.is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Path of the SQLite database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::unreachable(&self.db_path, e))?;
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            BUSY_TIMEOUT_MS
        ))?;
        Ok(conn)
    }

    /// Applies any pending schema migrations. Returns how many ran.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(applied.len())
    }

    /// Runs `f` inside an immediate (write-locked) transaction.
    ///
    /// Everything `f` writes is committed together, or rolled back if it
    /// returns an error.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or a storage error converted into `E`.
    #[instrument(skip_all)]
    pub fn write<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut StoreTx<'_>) -> Result<T, E>,
        E: From<DbError> + From<diesel::result::Error>,
    {
        let mut conn = self.connection()?;
        conn.immediate_transaction(|conn| f(&mut StoreTx { conn }))
    }

    /// Runs `f` inside a read transaction, giving it a consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or a storage error converted into `E`.
    #[instrument(skip_all)]
    pub fn read<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut StoreTx<'_>) -> Result<T, E>,
        E: From<DbError> + From<diesel::result::Error>,
    {
        let mut conn = self.connection()?;
        conn.transaction(|conn| f(&mut StoreTx { conn }))
    }
}

/// Queries available inside a [`GameRepository`] transaction.
pub struct StoreTx<'c> {
    conn: &'c mut SqliteConnection,
}

impl StoreTx<'_> {
    /// Gets a game by its public id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_game(&mut self, public_id: &str) -> Result<Option<GameRecord>, DbError> {
        let game = schema::games::table
            .filter(schema::games::public_id.eq(public_id))
            .select(GameRecord::as_select())
            .first(self.conn)
            .optional()?;
        debug!(found = game.is_some(), "Game lookup");
        Ok(game)
    }

    /// Gets the in-progress game, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn active_game(&mut self) -> Result<Option<GameRecord>, DbError> {
        Ok(schema::games::table
            .filter(schema::games::status.eq(GameStatus::InProgress.as_str()))
            .order(schema::games::id.desc())
            .select(GameRecord::as_select())
            .first(self.conn)
            .optional()?)
    }

    /// Gets the most recently created game, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn latest_game(&mut self) -> Result<Option<GameRecord>, DbError> {
        Ok(schema::games::table
            .order(schema::games::id.desc())
            .select(GameRecord::as_select())
            .first(self.conn)
            .optional()?)
    }

    /// Lists all games, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_games(&mut self) -> Result<Vec<GameRecord>, DbError> {
        let games = schema::games::table
            .order(schema::games::id.asc())
            .select(GameRecord::as_select())
            .load(self.conn)?;
        debug!(count = games.len(), "Games loaded");
        Ok(games)
    }

    /// Inserts a game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on a database error, including when another game
    /// is already in progress.
    #[instrument(skip(self, game), fields(public_id = %game.public_id()))]
    pub fn insert_game(&mut self, game: NewGameRecord) -> Result<GameRecord, DbError> {
        let game = diesel::insert_into(schema::games::table)
            .values(&game)
            .returning(GameRecord::as_returning())
            .get_result(self.conn)?;
        info!(game_id = game.id(), public_id = %game.public_id(), "Game stored");
        Ok(game)
    }

    /// Updates a game's status.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or the game does not exist.
    #[instrument(skip(self))]
    pub fn set_status(&mut self, game_id: i32, status: GameStatus) -> Result<(), DbError> {
        let updated = diesel::update(schema::games::table.find(game_id))
            .set(schema::games::status.eq(status.as_str()))
            .execute(self.conn)?;
        if updated == 0 {
            return Err(DbError::new(format!("No game with id {}", game_id)));
        }
        Ok(())
    }

    /// Marks every in-progress game as abandoned. Returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn abandon_in_progress(&mut self) -> Result<usize, DbError> {
        let updated = diesel::update(
            schema::games::table.filter(schema::games::status.eq(GameStatus::InProgress.as_str())),
        )
        .set(schema::games::status.eq(GameStatus::Abandoned.as_str()))
        .execute(self.conn)?;
        Ok(updated)
    }

    /// Moves of a game in sequence order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, game), fields(game_id = game.id()))]
    pub fn moves_for(&mut self, game: &GameRecord) -> Result<Vec<MoveRecord>, DbError> {
        Ok(MoveRecord::belonging_to(game)
            .order(schema::moves::move_number.asc())
            .select(MoveRecord::as_select())
            .load(self.conn)?)
    }

    /// Appends a move.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on a database error, including a duplicate move
    /// number or cell within the same game.
    #[instrument(skip(self, new_move), fields(game_id = new_move.game_id(), move_number = new_move.move_number()))]
    pub fn insert_move(&mut self, new_move: NewMoveRecord) -> Result<MoveRecord, DbError> {
        let stored = diesel::insert_into(schema::moves::table)
            .values(&new_move)
            .returning(MoveRecord::as_returning())
            .get_result(self.conn)?;
        debug!(move_id = stored.id(), x = stored.x(), y = stored.y(), "Move stored");
        Ok(stored)
    }
}
