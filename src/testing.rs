//! Test utilities for database setup.
//!
//! Reuses the production initialization so tests never carry their own schema.

use rusqlite::Connection;
use std::sync::MutexGuard;
use tempfile::TempDir;

use crate::db::{self, DbPool};
use crate::domain::{NewVocabularyList, VocabularyRow};

/// Test environment with a migrated anivocab.db in a temporary directory.
///
/// The directory is removed when the environment is dropped.
pub struct TestEnv {
  /// Temporary directory (kept alive for database file persistence)
  _temp: TempDir,
  pub pool: DbPool,
}

impl TestEnv {
  pub fn new() -> rusqlite::Result<Self> {
    let temp =
      TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let pool = db::init_db(&temp.path().join("anivocab.db"))?;
    Ok(Self { _temp: temp, pool })
  }

  /// Lock the shared connection
  pub fn conn(&self) -> MutexGuard<'_, Connection> {
    self.pool.lock().unwrap()
  }
}

/// A four-word list under `anime` season/episode
pub fn sample_list(anime: &str, season: i64, episode: i64, published: bool) -> NewVocabularyList {
  let rows = [
    ("進撃", "しんげき", "advance/attack"),
    ("自由", "じゆう", "freedom"),
    ("兵士", "へいし", "soldier"),
    ("戦う", "たたかう", "to fight"),
  ];

  NewVocabularyList {
    anime_name: anime.to_string(),
    season_number: season,
    episode_number: episode,
    csv_filename: None,
    uploaded_by: Some("admin-1".to_string()),
    is_published: published,
    rows: rows
      .into_iter()
      .map(|(word, reading, meaning)| VocabularyRow {
        word: word.to_string(),
        reading: reading.to_string(),
        meaning: meaning.to_string(),
      })
      .collect(),
  }
}
