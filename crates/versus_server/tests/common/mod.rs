//! Shared fixtures for server tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::NamedTempFile;
use versus_server::{Clock, GameRepository, GameService};
use versus_tictactoe::Randomness;

/// Always plays the first empty cell; the chaos roll is fixed.
#[derive(Debug, Clone, Copy)]
pub struct FirstCell {
    pub chaos: bool,
}

impl Randomness for FirstCell {
    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }

    fn roll(&mut self, _probability: f64) -> bool {
        self.chaos
    }
}

/// Clock frozen at a known instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock;

pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid timestamp")
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        fixed_time()
    }
}

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
pub fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

/// Service whose bot always takes the first empty cell after win/block checks.
pub fn setup_service(chaos: bool) -> (NamedTempFile, GameService) {
    let (db, repo) = setup_test_db();
    (db, GameService::new(repo, FirstCell { chaos }, FixedClock))
}
