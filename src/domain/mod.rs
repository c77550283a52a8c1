pub mod quiz;
pub mod vocabulary;

pub use quiz::{AttemptSummary, QuizAnswer, QuizAttempt, QuizMode, QuizQuestion};
pub use vocabulary::{
  Anime, AnimeWithSeasons, Episode, EpisodeWithLists, NewVocabularyList, Season,
  SeasonWithEpisodes, VocabularyList, VocabularyListSummary, VocabularyRow, VocabularyWord,
};
