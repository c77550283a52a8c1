//! Read-only learner endpoints: catalog, list detail and attempt history.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::config;
use crate::db;
use crate::domain::{AnimeWithSeasons, QuizAttempt, QuizMode, VocabularyList, VocabularyWord};
use crate::quiz::question_count_options;
use crate::state::AppState;

/// Published catalog tree
pub async fn catalog(State(state): State<AppState>) -> Result<Json<Vec<AnimeWithSeasons>>, ApiError> {
  let conn = db::try_lock(&state.db)?;
  Ok(Json(db::get_catalog(&conn, true)?))
}

/// Study view of a list plus what the quiz setup needs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDetail {
  #[serde(flatten)]
  pub list: VocabularyList,
  pub words: Vec<VocabularyWord>,
  pub word_count: usize,
  pub question_count_options: Vec<usize>,
  pub default_question_count: usize,
  pub quiz_modes: Vec<QuizMode>,
}

pub async fn list_detail(
  State(state): State<AppState>,
  Path(list_id): Path<i64>,
) -> Result<Json<ListDetail>, ApiError> {
  let conn = db::try_lock(&state.db)?;

  let list = db::get_vocabulary_list(&conn, list_id)?
    .filter(|l| l.is_published)
    .ok_or(ApiError::NotFound("Vocabulary list"))?;
  let words = db::get_words_for_list(&conn, list.id)?;

  Ok(Json(ListDetail {
    list,
    word_count: words.len(),
    question_count_options: question_count_options(words.len()),
    default_question_count: config::DEFAULT_QUESTION_COUNT.min(words.len()),
    quiz_modes: QuizMode::ALL.to_vec(),
    words,
  }))
}

pub async fn user_attempts(
  State(state): State<AppState>,
  Path(user_id): Path<String>,
) -> Result<Json<Vec<QuizAttempt>>, ApiError> {
  let conn = db::try_lock(&state.db)?;
  let attempts = db::get_attempts_for_user(&conn, &user_id, config::ATTEMPT_HISTORY_LIMIT)?;
  Ok(Json(attempts))
}
