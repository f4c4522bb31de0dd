//! Game lifecycle manager.
//!
//! Enforces a single in-progress game, alternates the starting player,
//! validates human moves and plays the bot's replies. Every write runs in
//! one store transaction so a request either fully applies or leaves no
//! trace.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};
use versus_tictactoe::{
    BOT, Board, Coord, GameStatus, HUMAN, Personality, PlacedMove, Player, Randomness,
    choose_personality, choose_starting_player, current_turn, derive_player, evaluate, select_move,
};

use crate::clock::{Clock, SystemClock};
use crate::db::{GameRecord, GameRepository, MoveRecord, NewGameRecord, NewMoveRecord, StoreTx};
use crate::error::{GameError, Rejection};
use crate::views::{
    CHAOS_MESSAGE, CreatedGame, GameDetail, GameSummary, GamesList, MoveHistoryItem, MoveResult,
    MovesList,
};

/// A game with its parsed fields and replayed board.
struct LoadedGame {
    record: GameRecord,
    status: GameStatus,
    starting: Player,
    personality: Personality,
    moves: Vec<MoveRecord>,
    board: Board,
}

impl LoadedGame {
    fn load(tx: &mut StoreTx<'_>, record: GameRecord) -> Result<Self, GameError> {
        let status = record.parse_status()?;
        let starting = record.parse_starting_player()?;
        let personality = record.parse_personality()?;
        let moves = tx.moves_for(&record)?;
        let placed = moves
            .iter()
            .map(MoveRecord::placed)
            .collect::<Result<Vec<PlacedMove>, _>>()?;
        let board = Board::reconstruct(starting, placed);
        Ok(Self {
            record,
            status,
            starting,
            personality,
            moves,
            board,
        })
    }

    fn current_turn(&self) -> Option<Player> {
        current_turn(self.status, self.starting, self.moves.len())
    }

    fn detail(&self) -> GameDetail {
        GameDetail {
            id: self.record.public_id().clone(),
            status: self.status,
            starting_player: self.starting,
            bot_type: self.personality,
            created_at: self.record.created_at().and_utc(),
            board: self.board.clone(),
            current_turn: self.current_turn(),
        }
    }
}

fn chaos_message(personality: Personality) -> Option<String> {
    (personality == Personality::Chaos).then(|| CHAOS_MESSAGE.to_string())
}

/// Orchestrates board replay, rule evaluation and bot moves over the store.
pub struct GameService {
    repo: GameRepository,
    rng: Mutex<Box<dyn Randomness + Send>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl GameService {
    /// Creates a service with explicit randomness and clock.
    #[instrument(skip_all, fields(db_path = %repo.db_path()))]
    pub fn new(
        repo: GameRepository,
        rng: impl Randomness + Send + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        info!("Creating game service");
        Self {
            repo,
            rng: Mutex::new(Box::new(rng)),
            clock: Arc::new(clock),
        }
    }

    /// Creates a service seeded from OS entropy and using the system clock.
    pub fn with_defaults(repo: GameRepository) -> Self {
        Self::new(repo, StdRng::from_entropy(), SystemClock)
    }

    /// The underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repo
    }

    fn rng(&self) -> MutexGuard<'_, Box<dyn Randomness + Send>> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Picks and stores the bot's move as number `number`.
    fn play_bot(
        &self,
        tx: &mut StoreTx<'_>,
        game: &GameRecord,
        board: &mut Board,
        personality: Personality,
        number: usize,
    ) -> Result<Coord, GameError> {
        let cell = {
            let mut rng = self.rng();
            select_move(board, personality, BOT, &mut **rng)
        }
        .ok_or_else(|| {
            GameError::Inconsistent(format!("game {} has no cell left for the bot", game.public_id()))
        })?;
        self.store_move(tx, game, number, cell)?;
        board.place(cell, BOT);
        debug!(%cell, number, ?personality, "Bot moved");
        Ok(cell)
    }

    fn store_move(
        &self,
        tx: &mut StoreTx<'_>,
        game: &GameRecord,
        number: usize,
        cell: Coord,
    ) -> Result<MoveRecord, GameError> {
        let number = i32::try_from(number)
            .map_err(|_| GameError::Inconsistent(format!("move number {} overflows", number)))?;
        let new_move = NewMoveRecord::new(
            *game.id(),
            number,
            i32::from(cell.x),
            i32::from(cell.y),
            self.clock.now(),
        );
        Ok(tx.insert_move(new_move)?)
    }

    /// Starts a new game, abandoning the one in progress.
    ///
    /// The starting player alternates relative to the most recently created
    /// game of any status. When the bot starts it plays move 1 immediately.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub fn create_game(&self) -> Result<CreatedGame, GameError> {
        self.repo.write::<_, GameError, _>(|tx| {
            let abandoned = tx.abandon_in_progress()?;
            if abandoned > 0 {
                info!(count = abandoned, "Abandoned in-progress game");
            }

            let previous = tx
                .latest_game()?
                .map(|g| g.parse_starting_player())
                .transpose()?;
            let starting = choose_starting_player(previous);
            let personality = {
                let mut rng = self.rng();
                choose_personality(&mut **rng)
            };

            let record =
                tx.insert_game(NewGameRecord::open(starting, personality, self.clock.now()))?;
            info!(
                public_id = %record.public_id(),
                ?starting,
                ?personality,
                "Game created"
            );

            let mut board = Board::new();
            let mut move_count = 0;
            let mut bot_move = None;
            if starting == BOT {
                bot_move = Some(self.play_bot(tx, &record, &mut board, personality, 1)?);
                move_count = 1;
            }

            let status = evaluate(&board);
            if status.is_terminal() {
                tx.set_status(*record.id(), status)?;
            }

            Ok(CreatedGame {
                id: record.public_id().clone(),
                status,
                starting_player: starting,
                bot_type: personality,
                board,
                current_turn: current_turn(status, starting, move_count),
                bot_move,
                message: chaos_message(personality),
            })
        })
    }

    /// Applies the human's move at `(x, y)` and the bot's reply.
    ///
    /// Checks run in order: existence, finished, bounds, turn, occupancy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameNotFound`] for an unknown id,
    /// [`GameError::Rejected`] with the current empty cells for an illegal
    /// move, and [`GameError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub fn apply_move(&self, game_id: &str, x: i64, y: i64) -> Result<MoveResult, GameError> {
        self.repo.write::<_, GameError, _>(|tx| {
            let record = tx.find_game(game_id)?.ok_or(GameError::GameNotFound)?;
            let game = LoadedGame::load(tx, record)?;
            let reject = |reason: Rejection| {
                warn!(%game_id, x, y, code = reason.code(), "Move rejected");
                GameError::rejected(reason, game.board.empty_cells())
            };

            if game.status != GameStatus::InProgress {
                return Err(reject(Rejection::GameFinished));
            }
            let cell = Coord::new(x, y).ok_or_else(|| reject(Rejection::OutOfBounds))?;
            if game.current_turn() != Some(HUMAN) {
                return Err(reject(Rejection::NotYourTurn));
            }
            if !game.board.is_empty(cell) {
                return Err(reject(Rejection::CellOccupied));
            }

            let mut board = game.board.clone();
            let human_number = game.moves.len() + 1;
            self.store_move(tx, &game.record, human_number, cell)?;
            board.place(cell, HUMAN);
            let mut status = evaluate(&board);
            let mut move_count = human_number;
            let mut bot_move = None;

            if status == GameStatus::InProgress {
                bot_move = Some(self.play_bot(
                    tx,
                    &game.record,
                    &mut board,
                    game.personality,
                    human_number + 1,
                )?);
                move_count += 1;
                status = evaluate(&board);
            }

            if status.is_terminal() {
                tx.set_status(*game.record.id(), status)?;
                info!(%game_id, %status, moves = move_count, "Game finished");
            }
            debug!(%game_id, board = %board, "Board after move");

            Ok(MoveResult {
                board,
                status,
                current_turn: current_turn(status, game.starting, move_count),
                message: bot_move.and_then(|_| chaos_message(game.personality)),
                bot_move,
            })
        })
    }

    /// The game currently in progress.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoActiveGame`] if none is in progress.
    #[instrument(skip(self))]
    pub fn current_game(&self) -> Result<GameDetail, GameError> {
        self.repo.read::<_, GameError, _>(|tx| {
            let record = tx.active_game()?.ok_or(GameError::NoActiveGame)?;
            Ok(LoadedGame::load(tx, record)?.detail())
        })
    }

    /// One game by public id.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameNotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn get_game(&self, game_id: &str) -> Result<GameDetail, GameError> {
        self.repo.read::<_, GameError, _>(|tx| {
            let record = tx.find_game(game_id)?.ok_or(GameError::GameNotFound)?;
            Ok(LoadedGame::load(tx, record)?.detail())
        })
    }

    /// All games, oldest first. Only games that are no longer in progress
    /// carry a final board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<GamesList, GameError> {
        self.repo.read::<_, GameError, _>(|tx| {
            let records = tx.list_games()?;
            let mut games = Vec::with_capacity(records.len());
            for record in records {
                let game = LoadedGame::load(tx, record)?;
                games.push(GameSummary {
                    id: game.record.public_id().clone(),
                    status: game.status,
                    bot_type: game.personality,
                    move_count: game.moves.len(),
                    created_at: game.record.created_at().and_utc(),
                    final_board: game.status.is_terminal().then(|| game.board.clone()),
                });
            }
            Ok(GamesList { games })
        })
    }

    /// Moves of one game with their derived players.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameNotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn list_moves(&self, game_id: &str) -> Result<MovesList, GameError> {
        self.repo.read::<_, GameError, _>(|tx| {
            let record = tx.find_game(game_id)?.ok_or(GameError::GameNotFound)?;
            let starting = record.parse_starting_player()?;
            let mut moves = Vec::new();
            for stored in tx.moves_for(&record)? {
                let placed = stored.placed()?;
                moves.push(MoveHistoryItem {
                    id: *stored.id(),
                    move_number: placed.number,
                    x: placed.coord.x,
                    y: placed.coord.y,
                    player: derive_player(starting, placed.number),
                    created_at: stored.created_at().and_utc(),
                });
            }
            Ok(MovesList {
                game_id: record.public_id().clone(),
                moves,
            })
        })
    }
}
