//! Multiple-choice question generation.
//!
//! Questions are drawn from a shuffled copy of the vocabulary, one per word.
//! Each question gets up to [`config::DISTRACTOR_COUNT`] distractors taken
//! from the same field of the other words, so a meaning question is always
//! answered among meanings, a reading question among readings, and so on.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::config;
use crate::domain::{QuizMode, QuizQuestion, VocabularyWord};

/// What to do when the vocabulary cannot supply enough unique distractors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistractorFallback {
  /// Fill the missing slots with synthetic "Option N" entries
  #[default]
  Pad,
  /// Offer fewer options instead
  Shrink,
}

impl DistractorFallback {
  pub fn from_str(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pad" => Some(Self::Pad),
      "shrink" => Some(Self::Shrink),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Pad => "pad",
      Self::Shrink => "shrink",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
  pub distractor_count: usize,
  pub fallback: DistractorFallback,
}

impl Default for GeneratorOptions {
  fn default() -> Self {
    Self {
      distractor_count: config::DISTRACTOR_COUNT,
      fallback: DistractorFallback::Pad,
    }
  }
}

impl GeneratorOptions {
  pub fn with_fallback(fallback: DistractorFallback) -> Self {
    Self {
      fallback,
      ..Self::default()
    }
  }
}

/// Generate up to `requested_count` questions using the thread-local RNG.
pub fn generate_questions(
  vocabulary: &[VocabularyWord],
  mode: QuizMode,
  requested_count: usize,
) -> Vec<QuizQuestion> {
  generate_questions_with(
    vocabulary,
    mode,
    requested_count,
    &GeneratorOptions::default(),
    &mut rand::rng(),
  )
}

/// Generate questions with explicit options and random source.
///
/// Returns `min(requested_count, vocabulary.len())` questions and never fails:
/// empty input gives an empty result, a small vocabulary degrades according
/// to `options.fallback`.
pub fn generate_questions_with<R: Rng + ?Sized>(
  vocabulary: &[VocabularyWord],
  mode: QuizMode,
  requested_count: usize,
  options: &GeneratorOptions,
  rng: &mut R,
) -> Vec<QuizQuestion> {
  let count = requested_count.min(vocabulary.len());
  if count == 0 {
    return Vec::new();
  }

  let mut pool: Vec<&VocabularyWord> = vocabulary.iter().collect();
  pool.shuffle(rng);
  pool.truncate(count);

  let mut questions = Vec::with_capacity(count);
  for word in pool {
    questions.push(build_question(word, vocabulary, mode, options, rng));
  }
  questions
}

fn build_question<R: Rng + ?Sized>(
  word: &VocabularyWord,
  vocabulary: &[VocabularyWord],
  mode: QuizMode,
  options: &GeneratorOptions,
  rng: &mut R,
) -> QuizQuestion {
  let correct = mode.answer_field(word).to_string();

  let mut choices = pick_distractors(vocabulary, word.id, mode, &correct, options, rng);
  choices.push(correct.clone());
  choices.shuffle(rng);

  // The correct answer is always present and unique among the choices
  let correct_option_index = choices.iter().position(|c| *c == correct).unwrap_or(0);

  QuizQuestion {
    id: word.id,
    prompt_text: mode.prompt_for(word),
    correct_answer_text: correct,
    options: choices,
    correct_option_index,
    source_word: word.clone(),
  }
}

/// Collect unique values of the mode's answer field from the other words.
fn pick_distractors<R: Rng + ?Sized>(
  vocabulary: &[VocabularyWord],
  current_id: i64,
  mode: QuizMode,
  correct: &str,
  options: &GeneratorOptions,
  rng: &mut R,
) -> Vec<String> {
  let needed = options.distractor_count;

  let mut others: Vec<&VocabularyWord> = vocabulary.iter().filter(|w| w.id != current_id).collect();
  others.shuffle(rng);

  let mut distractors: Vec<String> = Vec::with_capacity(needed);
  for other in others {
    if distractors.len() >= needed {
      break;
    }
    let value = mode.answer_field(other);
    if value != correct && !distractors.iter().any(|d| d == value) {
      distractors.push(value.to_string());
    }
  }

  if distractors.len() < needed && options.fallback == DistractorFallback::Pad {
    pad_with_placeholders(&mut distractors, correct, needed);
  }

  distractors
}

/// Fill up to `needed` entries with "Option N" texts that collide with nothing.
fn pad_with_placeholders(distractors: &mut Vec<String>, correct: &str, needed: usize) {
  let mut n = distractors.len() + 1;
  while distractors.len() < needed {
    let candidate = format!("Option {}", n);
    n += 1;
    if candidate != correct && !distractors.contains(&candidate) {
      distractors.push(candidate);
    }
  }
}
