//! Application state shared by all handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::db::DbPool;
use crate::quiz::GeneratorOptions;
use crate::session::QuizSessionStore;

#[derive(Clone)]
pub struct AppState {
  pub db: DbPool,
  pub sessions: QuizSessionStore,
  /// Bearer token for /api/admin; None disables the admin endpoints
  pub admin_token: Option<Arc<str>>,
  pub generator: GeneratorOptions,
}

impl AppState {
  pub fn new(db: DbPool, settings: &Settings) -> Self {
    Self {
      db,
      sessions: QuizSessionStore::new(),
      admin_token: settings.admin_token.as_deref().map(Arc::from),
      generator: GeneratorOptions::with_fallback(settings.distractor_fallback),
    }
  }
}
