//! Vocabulary list management, gated by [`AdminGuard`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::auth::AdminGuard;
use crate::db;
use crate::domain::{NewVocabularyList, VocabularyListSummary};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedList {
  pub id: i64,
  pub word_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
  pub is_published: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishState {
  pub id: i64,
  pub is_published: bool,
}

pub async fn list_lists(
  _admin: AdminGuard,
  State(state): State<AppState>,
) -> Result<Json<Vec<VocabularyListSummary>>, ApiError> {
  let conn = db::try_lock(&state.db)?;
  Ok(Json(db::list_vocabulary_lists(&conn)?))
}

pub async fn create_list(
  _admin: AdminGuard,
  State(state): State<AppState>,
  Json(req): Json<NewVocabularyList>,
) -> Result<(StatusCode, Json<CreatedList>), ApiError> {
  let req = req.normalized();
  req.validate().map_err(ApiError::InvalidInput)?;

  let conn = db::try_lock(&state.db)?;
  let id = db::create_vocabulary_list(&conn, &req)?;

  tracing::info!(
    "Created vocabulary list {} for {} S{}E{} ({} words)",
    id,
    req.anime_name,
    req.season_number,
    req.episode_number,
    req.rows.len()
  );

  Ok((
    StatusCode::CREATED,
    Json(CreatedList {
      id,
      word_count: req.rows.len(),
    }),
  ))
}

pub async fn publish_list(
  _admin: AdminGuard,
  State(state): State<AppState>,
  Path(list_id): Path<i64>,
  Json(req): Json<PublishRequest>,
) -> Result<Json<PublishState>, ApiError> {
  let conn = db::try_lock(&state.db)?;
  if !db::set_list_published(&conn, list_id, req.is_published)? {
    return Err(ApiError::NotFound("Vocabulary list"));
  }
  Ok(Json(PublishState {
    id: list_id,
    is_published: req.is_published,
  }))
}

pub async fn delete_list(
  _admin: AdminGuard,
  State(state): State<AppState>,
  Path(list_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  let conn = db::try_lock(&state.db)?;
  if !db::delete_vocabulary_list(&conn, list_id)? {
    return Err(ApiError::NotFound("Vocabulary list"));
  }
  tracing::info!("Deleted vocabulary list {}", list_id);
  Ok(StatusCode::NO_CONTENT)
}
