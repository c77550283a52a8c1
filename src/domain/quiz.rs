use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::VocabularyWord;

/// Which field is prompted and which is answered.
///
/// Any unrecognized wire value maps to [`QuizMode::MeaningFromWordReading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuizMode {
  /// Show word + reading, answer with the meaning
  #[default]
  MeaningFromWordReading,
  /// Show the meaning, answer with the word
  WordFromMeaning,
  /// Show the word, answer with the reading
  ReadingFromWord,
}

impl QuizMode {
  pub const ALL: [QuizMode; 3] = [
    QuizMode::MeaningFromWordReading,
    QuizMode::WordFromMeaning,
    QuizMode::ReadingFromWord,
  ];

  pub fn from_str(s: &str) -> Self {
    match s {
      "word-from-meaning" => Self::WordFromMeaning,
      "reading-from-word" => Self::ReadingFromWord,
      _ => Self::MeaningFromWordReading,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::MeaningFromWordReading => "meaning-from-word-reading",
      Self::WordFromMeaning => "word-from-meaning",
      Self::ReadingFromWord => "reading-from-word",
    }
  }

  /// Prompt shown to the user for a word
  pub fn prompt_for(&self, word: &VocabularyWord) -> String {
    match self {
      Self::MeaningFromWordReading => {
        format!("What is the meaning of: {} ({})?", word.word, word.reading)
      }
      Self::WordFromMeaning => format!("Which word means: {}?", word.meaning),
      Self::ReadingFromWord => format!("What is the reading of: {}?", word.word),
    }
  }

  /// Field that holds the answer; distractors are drawn from the same field
  pub fn answer_field<'a>(&self, word: &'a VocabularyWord) -> &'a str {
    match self {
      Self::MeaningFromWordReading => &word.meaning,
      Self::WordFromMeaning => &word.word,
      Self::ReadingFromWord => &word.reading,
    }
  }
}

impl From<String> for QuizMode {
  fn from(s: String) -> Self {
    Self::from_str(&s)
  }
}

impl From<QuizMode> for String {
  fn from(mode: QuizMode) -> Self {
    mode.as_str().to_string()
  }
}

/// A generated multiple-choice question.
///
/// `options[correct_option_index] == correct_answer_text` and options are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  /// Id of the source word
  pub id: i64,
  pub prompt_text: String,
  pub correct_answer_text: String,
  pub options: Vec<String>,
  pub correct_option_index: usize,
  pub source_word: VocabularyWord,
}

/// A user's response to one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
  pub question_id: i64,
  pub selected_answer_text: String,
  pub is_correct: bool,
  pub correct_answer_text: String,
  pub source_word: VocabularyWord,
}

impl QuizAnswer {
  pub fn for_question(question: &QuizQuestion, selected: &str) -> Self {
    Self {
      question_id: question.id,
      selected_answer_text: selected.to_string(),
      is_correct: selected == question.correct_answer_text,
      correct_answer_text: question.correct_answer_text.clone(),
      source_word: question.source_word.clone(),
    }
  }
}

/// What gets persisted when a quiz ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
  pub user_id: Option<String>,
  pub list_id: i64,
  pub quiz_mode: QuizMode,
  pub total_questions: i64,
  pub correct_answers: i64,
}

/// A stored quiz attempt
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
  pub id: i64,
  pub user_id: Option<String>,
  pub vocabulary_list_id: Option<i64>,
  pub quiz_type: QuizMode,
  pub total_questions: i64,
  pub correct_answers: i64,
  pub completed_at: DateTime<Utc>,
}
