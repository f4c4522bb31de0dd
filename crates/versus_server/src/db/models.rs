//! Database models and their mapping onto domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;
use uuid::Uuid;
use versus_tictactoe::{Coord, GameStatus, Personality, PlacedMove, Player};

use crate::db::{DbError, schema};

/// Stored game.
///
/// `id` is the internal row id and also the creation order; `public_id` is
/// the opaque token handed to clients.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRecord {
    id: i32,
    public_id: String,
    status: String,
    starting_player: String,
    bot_type: String,
    created_at: NaiveDateTime,
}

impl GameRecord {
    /// Parses the stored status string into a [`GameStatus`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored value is not a known status.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn parse_status(&self) -> Result<GameStatus, DbError> {
        self.status
            .parse()
            .map_err(|_| DbError::invalid_value("games", self.id, "status", &self.status))
    }

    /// Parses the stored starting player.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored value is neither `X` nor `O`.
    #[instrument(skip(self), fields(starting_player = %self.starting_player))]
    pub fn parse_starting_player(&self) -> Result<Player, DbError> {
        self.starting_player
            .parse()
            .map_err(|_| DbError::invalid_value("games", self.id, "starting_player", &self.starting_player))
    }

    /// Parses the stored bot personality.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored value is not a known personality.
    #[instrument(skip(self), fields(bot_type = %self.bot_type))]
    pub fn parse_personality(&self) -> Result<Personality, DbError> {
        self.bot_type
            .parse()
            .map_err(|_| DbError::invalid_value("games", self.id, "bot_type", &self.bot_type))
    }
}

/// Insertable game.
#[derive(Debug, Clone, Insertable, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    public_id: String,
    status: String,
    starting_player: String,
    bot_type: String,
    created_at: NaiveDateTime,
}

impl NewGameRecord {
    /// A fresh in-progress game with a newly minted public id.
    #[instrument]
    pub fn open(starting: Player, personality: Personality, created_at: NaiveDateTime) -> Self {
        Self {
            public_id: format!("c{}", Uuid::new_v4().simple()),
            status: GameStatus::InProgress.as_str().to_string(),
            starting_player: starting.symbol().to_string(),
            bot_type: personality.as_str().to_string(),
            created_at,
        }
    }
}

/// Stored move. The player is derived, never stored.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::moves)]
#[diesel(belongs_to(GameRecord, foreign_key = game_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MoveRecord {
    id: i32,
    game_id: i32,
    move_number: i32,
    x: i32,
    y: i32,
    created_at: NaiveDateTime,
}

impl MoveRecord {
    /// Converts the row into the shape the board replays.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored coordinates or move number are out of range.
    #[instrument(skip(self), fields(move_id = self.id))]
    pub fn placed(&self) -> Result<PlacedMove, DbError> {
        let coord = Coord::new(i64::from(self.x), i64::from(self.y)).ok_or_else(|| {
            DbError::invalid_value("moves", self.id, "cell", format!("({}, {})", self.x, self.y))
        })?;
        let number = u32::try_from(self.move_number)
            .map_err(|_| DbError::invalid_value("moves", self.id, "move_number", self.move_number))?;
        Ok(PlacedMove::new(number, coord))
    }
}

/// Insertable move.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::moves)]
pub struct NewMoveRecord {
    game_id: i32,
    move_number: i32,
    x: i32,
    y: i32,
    created_at: NaiveDateTime,
}
