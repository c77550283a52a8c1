//! Simple in-memory storage for live quiz sessions.
//!
//! Sessions are keyed by a random id handed to the client when the quiz starts
//! and auto-expire after [`config::SESSION_EXPIRY_HOURS`] of inactivity.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::config;
use crate::quiz::QuizSession;

/// Session entry with last access time for expiration
struct SessionEntry {
  session: QuizSession,
  last_access: DateTime<Utc>,
}

/// Error returned when the session map lock is poisoned
#[derive(Debug, Error)]
#[error("Session store unavailable")]
pub struct SessionStoreError;

type Sessions = HashMap<String, SessionEntry>;

#[derive(Clone, Default)]
pub struct QuizSessionStore {
  sessions: Arc<Mutex<Sessions>>,
}

impl QuizSessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> Result<MutexGuard<'_, Sessions>, SessionStoreError> {
    let mut sessions = self.sessions.lock().map_err(|_| {
      tracing::error!("Session store mutex poisoned");
      SessionStoreError
    })?;

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut sessions, Utc::now());
    }
    Ok(sessions)
  }

  /// Store a new session and return its id
  pub fn insert(&self, session: QuizSession) -> Result<String, SessionStoreError> {
    let mut sessions = self.lock()?;
    let mut id = generate_session_id();
    while sessions.contains_key(&id) {
      id = generate_session_id();
    }
    sessions.insert(
      id.clone(),
      SessionEntry {
        session,
        last_access: Utc::now(),
      },
    );
    Ok(id)
  }

  /// Run `f` against a live session. Returns None when the id is unknown or expired.
  pub fn with_session<T>(
    &self,
    id: &str,
    f: impl FnOnce(&mut QuizSession) -> T,
  ) -> Result<Option<T>, SessionStoreError> {
    let mut sessions = self.lock()?;
    let Some(entry) = sessions.get_mut(id) else {
      return Ok(None);
    };
    if is_expired(entry, Utc::now()) {
      sessions.remove(id);
      return Ok(None);
    }
    entry.last_access = Utc::now();
    Ok(Some(f(&mut entry.session)))
  }

  /// Remove and return a live session if `check` accepts it; a rejected session stays.
  ///
  /// The check and the removal happen under one lock, so a session is taken at most once.
  pub fn take_if<E>(
    &self,
    id: &str,
    check: impl FnOnce(&QuizSession) -> Result<(), E>,
  ) -> Result<Option<Result<QuizSession, E>>, SessionStoreError> {
    let mut sessions = self.lock()?;
    let Some(entry) = sessions.get(id) else {
      return Ok(None);
    };
    if is_expired(entry, Utc::now()) {
      sessions.remove(id);
      return Ok(None);
    }
    if let Err(e) = check(&entry.session) {
      return Ok(Some(Err(e)));
    }
    Ok(sessions.remove(id).map(|entry| Ok(entry.session)))
  }
}

fn is_expired(entry: &SessionEntry, now: DateTime<Utc>) -> bool {
  entry.last_access <= now - Duration::hours(config::SESSION_EXPIRY_HOURS)
}

/// Clean up expired sessions
fn cleanup_expired(sessions: &mut Sessions, now: DateTime<Utc>) {
  let before = sessions.len();
  sessions.retain(|_, entry| !is_expired(entry, now));
  let removed = before - sessions.len();
  if removed > 0 {
    tracing::debug!("Expired {} quiz session(s)", removed);
  }
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
