//! Quiz setup: which question counts to offer for a list.

use crate::config;

/// Preset counts that fit the list, plus the full list size when it is not a preset.
pub fn question_count_options(vocabulary_count: usize) -> Vec<usize> {
  let mut options: Vec<usize> = config::QUESTION_COUNT_PRESETS
    .iter()
    .copied()
    .filter(|&n| n <= vocabulary_count)
    .collect();

  if vocabulary_count > 0 && !options.contains(&vocabulary_count) {
    options.push(vocabulary_count);
  }

  options.sort_unstable();
  options
}
