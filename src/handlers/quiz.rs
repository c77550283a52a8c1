//! Quiz flow: start, answer one question at a time, then read the results.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::ApiError;
use crate::config;
use crate::db::{self, LogOnError};
use crate::domain::{AttemptSummary, QuizAnswer, QuizMode};
use crate::quiz::{
  generate_questions_with, incorrect_answers, Grade, QuizSession, ScoreSummary, SessionError,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizRequest {
  pub list_id: i64,
  /// Anything other than a known mode string (numbers, null, typos) uses the default
  #[serde(rename = "type", default, deserialize_with = "lenient_mode")]
  pub mode: QuizMode,
  #[serde(default)]
  pub count: Option<usize>,
  #[serde(default)]
  pub user_id: Option<String>,
}

fn lenient_mode<'de, D>(deserializer: D) -> Result<QuizMode, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(value.as_str().map(QuizMode::from_str).unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
  pub answer: String,
}

/// A question as shown to the user; the correct answer stays server-side
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
  pub position: usize,
  pub total: usize,
  pub id: i64,
  pub prompt_text: String,
  pub options: Vec<String>,
}

impl QuestionView {
  fn current(session: &QuizSession) -> Option<Self> {
    session.current_question().map(|q| Self {
      position: session.position(),
      total: session.total(),
      id: q.id,
      prompt_text: q.prompt_text.clone(),
      options: q.options.clone(),
    })
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStarted {
  pub session_id: String,
  pub list_id: i64,
  #[serde(rename = "type")]
  pub mode: QuizMode,
  pub total_questions: usize,
  pub question: Option<QuestionView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizProgress {
  pub list_id: i64,
  #[serde(rename = "type")]
  pub mode: QuizMode,
  pub answered: usize,
  pub total_questions: usize,
  pub finished: bool,
  pub question: Option<QuestionView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFeedback {
  #[serde(flatten)]
  pub answer: QuizAnswer,
  pub finished: bool,
  pub next_question: Option<QuestionView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
  pub list_id: i64,
  #[serde(rename = "type")]
  pub mode: QuizMode,
  pub score: ScoreSummary,
  pub grade: Grade,
  pub message: &'static str,
  pub answers: Vec<QuizAnswer>,
  pub incorrect_answers: Vec<QuizAnswer>,
}

impl QuizResults {
  fn from_session(session: &QuizSession) -> Self {
    let score = session.score();
    let grade = Grade::from_percentage(score.percentage);
    Self {
      list_id: session.list_id,
      mode: session.mode,
      score,
      grade,
      message: grade.message(),
      answers: session.answers().to_vec(),
      incorrect_answers: incorrect_answers(session.answers()).into_iter().cloned().collect(),
    }
  }
}

pub async fn start_quiz(
  State(state): State<AppState>,
  Json(req): Json<StartQuizRequest>,
) -> Result<(StatusCode, Json<QuizStarted>), ApiError> {
  let count = req.count.unwrap_or(config::DEFAULT_QUESTION_COUNT);
  if count == 0 {
    return Err(ApiError::EmptyQuiz);
  }

  let words = {
    let conn = db::try_lock(&state.db)?;
    let list = db::get_vocabulary_list(&conn, req.list_id)?
      .filter(|l| l.is_published)
      .ok_or(ApiError::NotFound("Vocabulary list"))?;
    db::get_words_for_list(&conn, list.id)?
  };

  let questions =
    generate_questions_with(&words, req.mode, count, &state.generator, &mut rand::rng());
  if questions.is_empty() {
    return Err(ApiError::EmptyQuiz);
  }

  let user_id = req.user_id.filter(|u| !u.trim().is_empty());
  let session = QuizSession::new(req.list_id, user_id, req.mode, questions);
  let question = QuestionView::current(&session);
  let total_questions = session.total();
  let session_id = state.sessions.insert(session)?;

  tracing::debug!(
    "Started {} quiz on list {} with {} questions",
    req.mode.as_str(),
    req.list_id,
    total_questions
  );

  Ok((
    StatusCode::CREATED,
    Json(QuizStarted {
      session_id,
      list_id: req.list_id,
      mode: req.mode,
      total_questions,
      question,
    }),
  ))
}

pub async fn quiz_progress(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
) -> Result<Json<QuizProgress>, ApiError> {
  let progress = state
    .sessions
    .with_session(&session_id, |session| QuizProgress {
      list_id: session.list_id,
      mode: session.mode,
      answered: session.position(),
      total_questions: session.total(),
      finished: session.is_finished(),
      question: QuestionView::current(session),
    })?
    .ok_or(ApiError::NotFound("Quiz session"))?;
  Ok(Json(progress))
}

pub async fn submit_answer(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
  Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerFeedback>, ApiError> {
  let (answer, next_question, summary) = state
    .sessions
    .with_session(&session_id, |session| -> Result<_, SessionError> {
      let answer = session.answer(&req.answer)?.clone();
      // Only available once the last question is answered
      let summary = session.attempt_summary().ok();
      Ok((answer, QuestionView::current(session), summary))
    })?
    .ok_or(ApiError::NotFound("Quiz session"))??;

  let finished = summary.is_some();
  if let Some(summary) = summary {
    save_attempt(&state, &summary);
  }

  Ok(Json(AnswerFeedback {
    answer,
    finished,
    next_question,
  }))
}

/// Persist a finished attempt. Failures are logged; the quiz still completes.
fn save_attempt(state: &AppState, summary: &AttemptSummary) {
  let saved = db::try_lock(&state.db)
    .map_err(ApiError::from)
    .and_then(|conn| db::insert_quiz_attempt(&conn, summary).map_err(ApiError::from))
    .log_warn("Failed to save quiz attempt");

  if let Some(attempt_id) = saved {
    tracing::info!(
      "Saved attempt {} on list {}: {}/{}",
      attempt_id,
      summary.list_id,
      summary.correct_answers,
      summary.total_questions
    );
  }
}

pub async fn quiz_results(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
) -> Result<Json<QuizResults>, ApiError> {
  let session = state
    .sessions
    .take_if(&session_id, |session| {
      if session.is_finished() {
        Ok(())
      } else {
        Err(SessionError::NotFinished)
      }
    })?
    .ok_or(ApiError::NotFound("Quiz session"))??;

  Ok(Json(QuizResults::from_session(&session)))
}
