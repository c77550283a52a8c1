//! Anime → season → episode catalog

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use super::parse_timestamp;
use super::vocabulary::{row_to_list, LIST_COLUMNS};
use crate::domain::{
  Anime, AnimeWithSeasons, Episode, EpisodeWithLists, Season, SeasonWithEpisodes, VocabularyList,
};
use crate::text::slugify;

/// Find an anime by the slug of `name`, inserting it if missing
pub fn get_or_create_anime(conn: &Connection, name: &str) -> Result<i64> {
  let slug = slugify(name);

  let existing: Option<i64> = conn
    .query_row("SELECT id FROM animes WHERE slug = ?1", params![slug], |row| row.get(0))
    .optional()?;
  if let Some(id) = existing {
    return Ok(id);
  }

  conn.execute(
    "INSERT INTO animes (name, slug, created_at) VALUES (?1, ?2, ?3)",
    params![name, slug, Utc::now().to_rfc3339()],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn get_or_create_season(conn: &Connection, anime_id: i64, season_number: i64) -> Result<i64> {
  let existing: Option<i64> = conn
    .query_row(
      "SELECT id FROM seasons WHERE anime_id = ?1 AND season_number = ?2",
      params![anime_id, season_number],
      |row| row.get(0),
    )
    .optional()?;
  if let Some(id) = existing {
    return Ok(id);
  }

  conn.execute(
    "INSERT INTO seasons (anime_id, season_number, created_at) VALUES (?1, ?2, ?3)",
    params![anime_id, season_number, Utc::now().to_rfc3339()],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn get_or_create_episode(conn: &Connection, season_id: i64, episode_number: i64) -> Result<i64> {
  let existing: Option<i64> = conn
    .query_row(
      "SELECT id FROM episodes WHERE season_id = ?1 AND episode_number = ?2",
      params![season_id, episode_number],
      |row| row.get(0),
    )
    .optional()?;
  if let Some(id) = existing {
    return Ok(id);
  }

  conn.execute(
    "INSERT INTO episodes (season_id, episode_number, created_at) VALUES (?1, ?2, ?3)",
    params![season_id, episode_number, Utc::now().to_rfc3339()],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn count_animes(conn: &Connection) -> Result<i64> {
  conn.query_row("SELECT COUNT(*) FROM animes", [], |row| row.get(0))
}

fn row_to_anime(row: &Row) -> Result<Anime> {
  let created_at: String = row.get(3)?;
  Ok(Anime {
    id: row.get(0)?,
    name: row.get(1)?,
    slug: row.get(2)?,
    created_at: parse_timestamp(&created_at),
  })
}

/// Full catalog tree ordered by anime name, season number and episode number.
///
/// Every anime, season and episode is listed; with `published_only` the
/// vocabulary lists under each episode are restricted to published ones.
pub fn get_catalog(conn: &Connection, published_only: bool) -> Result<Vec<AnimeWithSeasons>> {
  let animes = conn
    .prepare("SELECT id, name, slug, created_at FROM animes ORDER BY name COLLATE NOCASE")?
    .query_map([], row_to_anime)?
    .collect::<Result<Vec<_>>>()?;

  let seasons = conn
    .prepare("SELECT id, anime_id, season_number FROM seasons ORDER BY season_number")?
    .query_map([], |row| {
      Ok(Season {
        id: row.get(0)?,
        anime_id: row.get(1)?,
        season_number: row.get(2)?,
      })
    })?
    .collect::<Result<Vec<_>>>()?;

  let episodes = conn
    .prepare("SELECT id, season_id, episode_number FROM episodes ORDER BY episode_number")?
    .query_map([], |row| {
      Ok(Episode {
        id: row.get(0)?,
        season_id: row.get(1)?,
        episode_number: row.get(2)?,
      })
    })?
    .collect::<Result<Vec<_>>>()?;

  let list_sql = if published_only {
    format!(
      "SELECT {} FROM vocabulary_lists WHERE is_published = 1 ORDER BY created_at",
      LIST_COLUMNS
    )
  } else {
    format!("SELECT {} FROM vocabulary_lists ORDER BY created_at", LIST_COLUMNS)
  };
  let lists = conn
    .prepare(&list_sql)?
    .query_map([], row_to_list)?
    .collect::<Result<Vec<VocabularyList>>>()?;

  // Build nested structure
  let tree = animes
    .into_iter()
    .map(|anime| {
      let anime_seasons = seasons
        .iter()
        .filter(|s| s.anime_id == anime.id)
        .map(|season| {
          let season_episodes = episodes
            .iter()
            .filter(|e| e.season_id == season.id)
            .map(|episode| EpisodeWithLists {
              episode: episode.clone(),
              vocabulary_lists: lists
                .iter()
                .filter(|l| l.episode_id == episode.id)
                .cloned()
                .collect(),
            })
            .collect();
          SeasonWithEpisodes {
            season: season.clone(),
            episodes: season_episodes,
          }
        })
        .collect();
      AnimeWithSeasons {
        anime,
        seasons: anime_seasons,
      }
    })
    .collect();

  Ok(tree)
}
