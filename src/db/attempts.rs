use chrono::Utc;
use rusqlite::{params, Connection, Result};

use super::parse_timestamp;
use crate::domain::{AttemptSummary, QuizAttempt, QuizMode};

/// Record a finished quiz.
///
/// A list deleted while the quiz was running is stored as a NULL reference,
/// the same as an attempt whose list is deleted later.
pub fn insert_quiz_attempt(conn: &Connection, summary: &AttemptSummary) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO quiz_attempts (user_id, vocabulary_list_id, quiz_type, total_questions, correct_answers, completed_at)
    VALUES (?1, (SELECT id FROM vocabulary_lists WHERE id = ?2), ?3, ?4, ?5, ?6)
    "#,
    params![
      summary.user_id,
      summary.list_id,
      summary.quiz_mode.as_str(),
      summary.total_questions,
      summary.correct_answers,
      Utc::now().to_rfc3339(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

/// Most recent attempts for a user, newest first
pub fn get_attempts_for_user(conn: &Connection, user_id: &str, limit: i64) -> Result<Vec<QuizAttempt>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, user_id, vocabulary_list_id, quiz_type, total_questions, correct_answers, completed_at
    FROM quiz_attempts
    WHERE user_id = ?1
    ORDER BY completed_at DESC, id DESC
    LIMIT ?2
    "#,
  )?;

  let attempts = stmt
    .query_map(params![user_id, limit], |row| {
      let quiz_type: String = row.get(3)?;
      let completed_at: String = row.get(6)?;
      Ok(QuizAttempt {
        id: row.get(0)?,
        user_id: row.get(1)?,
        vocabulary_list_id: row.get(2)?,
        quiz_type: QuizMode::from_str(&quiz_type),
        total_questions: row.get(4)?,
        correct_answers: row.get(5)?,
        completed_at: parse_timestamp(&completed_at),
      })
    })?
    .collect::<Result<Vec<_>>>()?;
  Ok(attempts)
}
