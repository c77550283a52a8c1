//! In-progress quiz state: the generated questions and the answers recorded so far.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::scorer::{self, ScoreSummary};
use crate::domain::{AttemptSummary, QuizAnswer, QuizMode, QuizQuestion};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
  #[error("All questions have already been answered")]
  AlreadyFinished,

  #[error("'{0}' is not one of the offered options")]
  NotAnOption(String),

  #[error("The quiz is not finished yet")]
  NotFinished,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
  pub list_id: i64,
  pub user_id: Option<String>,
  pub mode: QuizMode,
  pub started_at: DateTime<Utc>,
  questions: Vec<QuizQuestion>,
  answers: Vec<QuizAnswer>,
}

impl QuizSession {
  pub fn new(
    list_id: i64,
    user_id: Option<String>,
    mode: QuizMode,
    questions: Vec<QuizQuestion>,
  ) -> Self {
    Self {
      list_id,
      user_id,
      mode,
      started_at: Utc::now(),
      answers: Vec::with_capacity(questions.len()),
      questions,
    }
  }

  /// Zero-based index of the question awaiting an answer
  pub fn position(&self) -> usize {
    self.answers.len()
  }

  pub fn total(&self) -> usize {
    self.questions.len()
  }

  pub fn current_question(&self) -> Option<&QuizQuestion> {
    self.questions.get(self.position())
  }

  pub fn is_finished(&self) -> bool {
    self.position() >= self.questions.len()
  }

  pub fn answers(&self) -> &[QuizAnswer] {
    &self.answers
  }

  /// Record the user's pick for the current question and move on.
  pub fn answer(&mut self, selected: &str) -> Result<&QuizAnswer, SessionError> {
    let question = self.current_question().ok_or(SessionError::AlreadyFinished)?;

    if !question.options.iter().any(|o| o == selected) {
      return Err(SessionError::NotAnOption(selected.to_string()));
    }

    let answer = QuizAnswer::for_question(question, selected);
    self.answers.push(answer);
    Ok(&self.answers[self.answers.len() - 1])
  }

  pub fn score(&self) -> ScoreSummary {
    scorer::score(&self.answers)
  }

  /// Summary for the attempt store. Only available once every question is answered.
  pub fn attempt_summary(&self) -> Result<AttemptSummary, SessionError> {
    if !self.is_finished() {
      return Err(SessionError::NotFinished);
    }
    let score = self.score();
    Ok(AttemptSummary {
      user_id: self.user_id.clone(),
      list_id: self.list_id,
      quiz_mode: self.mode,
      total_questions: self.questions.len() as i64,
      correct_answers: score.correct as i64,
    })
  }
}
