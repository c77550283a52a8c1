pub mod attempts;
pub mod catalog;
pub mod schema;
pub mod vocabulary;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use crate::domain::{NewVocabularyList, VocabularyRow};

// Re-export all public items from submodules
pub use attempts::*;
pub use catalog::*;
pub use schema::run_migrations;
pub use vocabulary::*;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
  /// Log the error at warn level and return None
  fn log_warn(self, context: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
  fn log_warn(self, context: &str) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        None
      }
    }
  }
}

/// Error returned when a shared lock cannot be acquired
#[derive(Debug, Error)]
#[error("Database unavailable")]
pub struct DbLockError;

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    if let Err(e) = std::fs::create_dir_all(parent) {
      tracing::warn!("Could not create {}: {}", parent.display(), e);
    }
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// Stored timestamps are RFC3339; anything unreadable becomes "now"
pub(crate) fn parse_timestamp(value: &str) -> DateTime<Utc> {
  DateTime::parse_from_rfc3339(value)
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|_| Utc::now())
}

/// Insert a published starter list when the catalog is empty
pub fn seed_sample_catalog(conn: &Connection) -> Result<()> {
  if count_animes(conn)? > 0 {
    return Ok(());
  }

  let list = NewVocabularyList {
    anime_name: "Attack on Titan".to_string(),
    season_number: 1,
    episode_number: 1,
    csv_filename: Some("attack-on-titan-s1e1.csv".to_string()),
    uploaded_by: None,
    is_published: true,
    rows: get_sample_rows(),
  };
  let list_id = create_vocabulary_list(conn, &list)?;
  tracing::info!("Seeded sample vocabulary list {}", list_id);
  Ok(())
}

fn get_sample_rows() -> Vec<VocabularyRow> {
  let rows = [
    ("進撃", "しんげき", "advance/attack"),
    ("自由", "じゆう", "freedom"),
    ("兵士", "へいし", "soldier"),
    ("戦う", "たたかう", "to fight"),
    ("巨人", "きょじん", "giant"),
    ("壁", "かべ", "wall"),
    ("調査", "ちょうさ", "investigation"),
    ("心臓", "しんぞう", "heart"),
    ("捧げる", "ささげる", "to dedicate"),
    ("外", "そと", "outside"),
  ];

  rows
    .into_iter()
    .map(|(word, reading, meaning)| VocabularyRow {
      word: word.to_string(),
      reading: reading.to_string(),
      meaning: meaning.to_string(),
    })
    .collect()
}
