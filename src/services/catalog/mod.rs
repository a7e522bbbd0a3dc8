//! Anime metadata catalog abstraction
//!
//! The catalog is injected into handlers through `AppState`, so tests and
//! alternative metadata sources can stand in for the Jikan client.

use std::{str::FromStr, sync::Arc};

use crate::{
    error::{AppError, AppResult},
    models::{AnimeDetail, AnimeListing, Genre, JikanAnime, JikanPage},
};

pub mod jikan;

pub use jikan::JikanClient;

/// Browse sections shown on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Airing,
    Popular,
    Upcoming,
}

impl Section {
    /// Jikan `/top/anime` filter for this section
    pub fn filter(&self) -> &'static str {
        match self {
            Section::Airing => "airing",
            Section::Popular => "bypopularity",
            Section::Upcoming => "upcoming",
        }
    }
}

impl FromStr for Section {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "airing" => Ok(Section::Airing),
            "popular" => Ok(Section::Popular),
            "upcoming" => Ok(Section::Upcoming),
            _ => Err(AppError::InvalidInput("Unacceptable anime type.".to_string())),
        }
    }
}

/// Airing status filter accepted by catalog search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiringStatus {
    Airing,
    Complete,
    Upcoming,
}

impl AiringStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiringStatus::Airing => "airing",
            AiringStatus::Complete => "complete",
            AiringStatus::Upcoming => "upcoming",
        }
    }
}

impl FromStr for AiringStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "airing" => Ok(AiringStatus::Airing),
            "complete" => Ok(AiringStatus::Complete),
            "upcoming" => Ok(AiringStatus::Upcoming),
            other => Err(AppError::InvalidInput(format!("Unknown airing status: {}", other))),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AnimeCatalog: Send + Sync {
    /// Top TV anime for a browse section
    async fn top_animes(&self, section: Section, page: u32) -> AppResult<JikanPage>;

    /// Free-text search, optionally narrowed by status and genres
    async fn search(
        &self,
        query: &str,
        status: Option<AiringStatus>,
        genres: Vec<Genre>,
        page: u32,
    ) -> AppResult<JikanPage>;

    /// A single anime by MyAnimeList id
    async fn anime(&self, mal_id: i32) -> AppResult<JikanAnime>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetches one anime and derives the list-record attributes a client needs to track it
pub async fn anime_detail(catalog: Arc<dyn AnimeCatalog>, mal_id: i32) -> AppResult<AnimeDetail> {
    let anime = catalog.anime(mal_id).await?;
    let listing = AnimeListing::from(&anime);

    tracing::debug!(
        provider = catalog.name(),
        mal_id,
        genres = listing.anime_genres.len(),
        "Fetched anime detail"
    );

    Ok(AnimeDetail {
        data: anime,
        listing,
    })
}
