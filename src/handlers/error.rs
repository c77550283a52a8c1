use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::db::DbLockError;
use crate::quiz::SessionError;
use crate::session::SessionStoreError;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Database error")]
  Database(#[from] rusqlite::Error),

  #[error(transparent)]
  DbUnavailable(#[from] DbLockError),

  #[error(transparent)]
  SessionsUnavailable(#[from] SessionStoreError),

  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("{0}")]
  InvalidInput(String),

  #[error("No questions could be generated for this quiz")]
  EmptyQuiz,

  #[error(transparent)]
  Session(#[from] SessionError),

  #[error("Missing or invalid admin token")]
  Unauthorized,

  #[error("Admin endpoints are disabled")]
  AdminDisabled,
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::DbUnavailable(_) | ApiError::SessionsUnavailable(_) => {
        StatusCode::SERVICE_UNAVAILABLE
      }
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
      ApiError::EmptyQuiz => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Session(SessionError::NotAnOption(_)) => StatusCode::BAD_REQUEST,
      ApiError::Session(_) => StatusCode::CONFLICT,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::AdminDisabled => StatusCode::FORBIDDEN,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    // Driver details stay in the log
    match &self {
      ApiError::Database(e) => tracing::error!("Database error: {}", e),
      _ if status.is_server_error() => tracing::error!("{}", self),
      _ => {}
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
