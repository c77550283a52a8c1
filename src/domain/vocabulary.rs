use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::text::normalize_field;

/// One studyable term inside a vocabulary list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
  pub id: i64,
  pub vocabulary_list_id: i64,
  pub word: String,
  pub reading: String,
  pub meaning: String,
  pub order_index: i64,
}

impl VocabularyWord {
  pub fn new(id: i64, word: &str, reading: &str, meaning: &str) -> Self {
    Self {
      id,
      vocabulary_list_id: 0,
      word: word.to_string(),
      reading: reading.to_string(),
      meaning: meaning.to_string(),
      order_index: id,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
  pub id: i64,
  pub name: String,
  pub slug: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
  pub id: i64,
  pub anime_id: i64,
  pub season_number: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
  pub id: i64,
  pub season_id: i64,
  pub episode_number: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyList {
  pub id: i64,
  pub episode_id: i64,
  pub csv_filename: String,
  pub uploaded_by: Option<String>,
  pub is_published: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// Nested catalog views (dashboard tree)

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeWithSeasons {
  #[serde(flatten)]
  pub anime: Anime,
  pub seasons: Vec<SeasonWithEpisodes>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonWithEpisodes {
  #[serde(flatten)]
  pub season: Season,
  pub episodes: Vec<EpisodeWithLists>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeWithLists {
  #[serde(flatten)]
  pub episode: Episode,
  pub vocabulary_lists: Vec<VocabularyList>,
}

/// Admin listing row: a list with its catalog position and size
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyListSummary {
  #[serde(flatten)]
  pub list: VocabularyList,
  pub anime_name: String,
  pub season_number: i64,
  pub episode_number: i64,
  pub word_count: i64,
}

/// One uploaded vocabulary row, before it is assigned an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRow {
  pub word: String,
  pub reading: String,
  pub meaning: String,
}

/// Admin request for a new vocabulary list under anime/season/episode
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVocabularyList {
  pub anime_name: String,
  pub season_number: i64,
  pub episode_number: i64,
  #[serde(default)]
  pub csv_filename: Option<String>,
  #[serde(default)]
  pub uploaded_by: Option<String>,
  #[serde(default)]
  pub is_published: bool,
  pub rows: Vec<VocabularyRow>,
}

impl NewVocabularyList {
  /// Trim and NFC-normalize every text field so equal-looking entries compare equal
  pub fn normalized(self) -> Self {
    Self {
      anime_name: normalize_field(&self.anime_name),
      csv_filename: self.csv_filename.map(|f| normalize_field(&f)),
      uploaded_by: self
        .uploaded_by
        .map(|u| normalize_field(&u))
        .filter(|u| !u.is_empty()),
      rows: self
        .rows
        .into_iter()
        .map(|row| VocabularyRow {
          word: normalize_field(&row.word),
          reading: normalize_field(&row.reading),
          meaning: normalize_field(&row.meaning),
        })
        .collect(),
      ..self
    }
  }

  /// Check the request before touching the store. Fields are expected to be normalized.
  pub fn validate(&self) -> Result<(), String> {
    if self.anime_name.is_empty() {
      return Err("Anime name is required".to_string());
    }
    if self.season_number < 1 {
      return Err("Season number must be at least 1".to_string());
    }
    if self.episode_number < 1 {
      return Err("Episode number must be at least 1".to_string());
    }
    if self.rows.is_empty() {
      return Err("Vocabulary list has no rows".to_string());
    }
    for (i, row) in self.rows.iter().enumerate() {
      if row.word.is_empty() || row.reading.is_empty() || row.meaning.is_empty() {
        return Err(format!(
          "Row {} must have 'word', 'reading', and 'meaning'",
          i + 1
        ));
      }
    }
    Ok(())
  }
}
