//! Application configuration.
//!
//! Constants live here alongside [`Settings`], which resolves the runtime
//! values with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;
use crate::quiz::DistractorFallback;

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 3000;

// ==================== Quiz Configuration ====================

/// Number of distractor choices per question (4 options total)
pub const DISTRACTOR_COUNT: usize = 3;

/// Question counts offered on quiz setup
pub const QUESTION_COUNT_PRESETS: [usize; 4] = [10, 20, 30, 50];

/// Question count used when a quiz request omits it
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Limit for attempt history queries
pub const ATTEMPT_HISTORY_LIMIT: i64 = 20;

// ==================== Session Configuration ====================

/// Quiz session expiration time in hours of inactivity
pub const SESSION_EXPIRY_HOURS: i64 = 2;

/// Probability threshold for session cleanup (0-255, lower = less frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

// ==================== config.toml ====================

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
  database: Option<DatabaseConfig>,
  server: Option<ServerConfig>,
  admin: Option<AdminConfig>,
  quiz: Option<QuizConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
  path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
  port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct AdminConfig {
  token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuizConfig {
  distractor_fallback: Option<DistractorFallback>,
}

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub database_path: PathBuf,
  pub port: u16,
  /// Shared secret for /api/admin; admin endpoints are disabled when None
  pub admin_token: Option<String>,
  pub distractor_fallback: DistractorFallback,
}

impl Settings {
  /// Load settings from config.toml, the process environment and .env
  pub fn load() -> Self {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file = match std::fs::read_to_string(paths::CONFIG_FILE) {
      Ok(contents) => match toml::from_str::<FileConfig>(&contents) {
        Ok(config) => config,
        Err(e) => {
          tracing::warn!("Ignoring invalid {}: {}", paths::CONFIG_FILE, e);
          FileConfig::default()
        }
      },
      Err(_) => FileConfig::default(),
    };

    Self::resolve(file, |key| std::env::var(key).ok())
  }

  fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
    let database_path = file
      .database
      .and_then(|d| d.path)
      .or_else(|| env("DATABASE_PATH"))
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(paths::db_path()));

    let port = file
      .server
      .and_then(|s| s.port)
      .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
      .unwrap_or(SERVER_PORT);

    let admin_token = file
      .admin
      .and_then(|a| a.token)
      .or_else(|| env("ADMIN_TOKEN"))
      .filter(|t| !t.trim().is_empty());

    let distractor_fallback = file
      .quiz
      .and_then(|q| q.distractor_fallback)
      .or_else(|| env("DISTRACTOR_FALLBACK").and_then(|v| DistractorFallback::from_str(&v)))
      .unwrap_or_default();

    Self {
      database_path,
      port,
      admin_token,
      distractor_fallback,
    }
  }

  /// Get the full server bind address
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", SERVER_ADDR, self.port)
  }
}
