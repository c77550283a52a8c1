//! Vocabulary lists and their words

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use super::catalog::{get_or_create_anime, get_or_create_episode, get_or_create_season};
use super::parse_timestamp;
use crate::domain::{NewVocabularyList, VocabularyList, VocabularyListSummary, VocabularyWord};

/// Filename recorded for lists entered without an upload
pub const MANUAL_ENTRY_FILENAME: &str = "manual-entry";

pub(crate) const LIST_COLUMNS: &str =
  "id, episode_id, csv_filename, uploaded_by, is_published, created_at, updated_at";

pub(crate) fn row_to_list(row: &Row) -> Result<VocabularyList> {
  let created_at: String = row.get(5)?;
  let updated_at: String = row.get(6)?;
  Ok(VocabularyList {
    id: row.get(0)?,
    episode_id: row.get(1)?,
    csv_filename: row.get(2)?,
    uploaded_by: row.get(3)?,
    is_published: row.get(4)?,
    created_at: parse_timestamp(&created_at),
    updated_at: parse_timestamp(&updated_at),
  })
}

fn row_to_word(row: &Row) -> Result<VocabularyWord> {
  Ok(VocabularyWord {
    id: row.get(0)?,
    vocabulary_list_id: row.get(1)?,
    word: row.get(2)?,
    reading: row.get(3)?,
    meaning: row.get(4)?,
    order_index: row.get(5)?,
  })
}

/// Create a list (and any missing anime/season/episode) with its words.
///
/// Words keep the row order as `order_index`. Runs in a single transaction;
/// the request is expected to be normalized and validated already.
pub fn create_vocabulary_list(conn: &Connection, list: &NewVocabularyList) -> Result<i64> {
  let tx = conn.unchecked_transaction()?;

  let anime_id = get_or_create_anime(&tx, &list.anime_name)?;
  let season_id = get_or_create_season(&tx, anime_id, list.season_number)?;
  let episode_id = get_or_create_episode(&tx, season_id, list.episode_number)?;

  let now = Utc::now().to_rfc3339();
  let filename = list
    .csv_filename
    .as_deref()
    .filter(|f| !f.is_empty())
    .unwrap_or(MANUAL_ENTRY_FILENAME);

  tx.execute(
    r#"
    INSERT INTO vocabulary_lists (episode_id, csv_filename, uploaded_by, is_published, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?5)
    "#,
    params![episode_id, filename, list.uploaded_by, list.is_published, now],
  )?;
  let list_id = tx.last_insert_rowid();

  {
    let mut stmt = tx.prepare(
      r#"
      INSERT INTO vocabulary_words (vocabulary_list_id, word, reading, meaning, order_index, created_at)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6)
      "#,
    )?;
    for (index, row) in list.rows.iter().enumerate() {
      stmt.execute(params![list_id, row.word, row.reading, row.meaning, index as i64, now])?;
    }
  }

  tx.commit()?;
  Ok(list_id)
}

pub fn get_vocabulary_list(conn: &Connection, list_id: i64) -> Result<Option<VocabularyList>> {
  conn
    .query_row(
      &format!("SELECT {} FROM vocabulary_lists WHERE id = ?1", LIST_COLUMNS),
      params![list_id],
      row_to_list,
    )
    .optional()
}

/// Words of a list in display order
pub fn get_words_for_list(conn: &Connection, list_id: i64) -> Result<Vec<VocabularyWord>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, vocabulary_list_id, word, reading, meaning, order_index
    FROM vocabulary_words
    WHERE vocabulary_list_id = ?1
    ORDER BY order_index ASC, id ASC
    "#,
  )?;

  let words = stmt
    .query_map(params![list_id], row_to_word)?
    .collect::<Result<Vec<_>>>()?;
  Ok(words)
}

/// Every list with its catalog labels and word count, newest first
pub fn list_vocabulary_lists(conn: &Connection) -> Result<Vec<VocabularyListSummary>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT l.id, l.episode_id, l.csv_filename, l.uploaded_by, l.is_published, l.created_at, l.updated_at,
           a.name, s.season_number, e.episode_number,
           (SELECT COUNT(*) FROM vocabulary_words w WHERE w.vocabulary_list_id = l.id)
    FROM vocabulary_lists l
    JOIN episodes e ON e.id = l.episode_id
    JOIN seasons s ON s.id = e.season_id
    JOIN animes a ON a.id = s.anime_id
    ORDER BY l.created_at DESC, l.id DESC
    "#,
  )?;

  let lists = stmt
    .query_map([], |row| {
      Ok(VocabularyListSummary {
        list: row_to_list(row)?,
        anime_name: row.get(7)?,
        season_number: row.get(8)?,
        episode_number: row.get(9)?,
        word_count: row.get(10)?,
      })
    })?
    .collect::<Result<Vec<_>>>()?;
  Ok(lists)
}

/// Returns false when the list does not exist
pub fn set_list_published(conn: &Connection, list_id: i64, is_published: bool) -> Result<bool> {
  let updated = conn.execute(
    "UPDATE vocabulary_lists SET is_published = ?1, updated_at = ?2 WHERE id = ?3",
    params![is_published, Utc::now().to_rfc3339(), list_id],
  )?;
  Ok(updated > 0)
}

/// Delete a list; its words go with it. Returns false when the list does not exist.
pub fn delete_vocabulary_list(conn: &Connection, list_id: i64) -> Result<bool> {
  let tx = conn.unchecked_transaction()?;
  // Explicit even though the foreign key cascades
  tx.execute(
    "DELETE FROM vocabulary_words WHERE vocabulary_list_id = ?1",
    params![list_id],
  )?;
  let deleted = tx.execute("DELETE FROM vocabulary_lists WHERE id = ?1", params![list_id])?;
  tx.commit()?;
  Ok(deleted > 0)
}
