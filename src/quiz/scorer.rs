use serde::Serialize;

use crate::domain::QuizAnswer;

/// Correct/total/percentage summary of a finished quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
  pub correct: usize,
  pub total: usize,
  pub percentage: u32,
}

pub fn score(answers: &[QuizAnswer]) -> ScoreSummary {
  let correct = answers.iter().filter(|a| a.is_correct).count();
  let total = answers.len();
  ScoreSummary {
    correct,
    total,
    percentage: percentage(correct, total),
  }
}

/// `round(100 * correct / total)`, halves rounding up; 0 when total is 0
pub fn percentage(correct: usize, total: usize) -> u32 {
  if total == 0 {
    return 0;
  }
  ((200 * correct + total) / (2 * total)) as u32
}

/// Answers the user got wrong, in quiz order
pub fn incorrect_answers(answers: &[QuizAnswer]) -> Vec<&QuizAnswer> {
  answers.iter().filter(|a| !a.is_correct).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
  Outstanding,
  GreatJob,
  GoodWork,
  KeepPracticing,
  KeepTrying,
}

impl Grade {
  pub fn from_percentage(percentage: u32) -> Self {
    match percentage {
      90.. => Self::Outstanding,
      80..=89 => Self::GreatJob,
      70..=79 => Self::GoodWork,
      60..=69 => Self::KeepPracticing,
      _ => Self::KeepTrying,
    }
  }

  pub fn message(&self) -> &'static str {
    match self {
      Self::Outstanding => "Outstanding!",
      Self::GreatJob => "Great Job!",
      Self::GoodWork => "Good Work!",
      Self::KeepPracticing => "Keep Practicing!",
      Self::KeepTrying => "Keep Trying!",
    }
  }
}
