use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Jikan API Types
// ============================================================================

/// Paged list response from Jikan (`/top/anime`, `/anime?q=`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanPage {
    pub data: Vec<JikanAnime>,
    pub pagination: JikanPagination,
}

/// Single anime response from Jikan (`/anime/{id}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanAnimeResponse {
    pub data: JikanAnime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanPagination {
    pub current_page: Option<u32>,
    pub last_visible_page: u32,
    pub has_next_page: bool,
    #[serde(default)]
    pub items: Option<JikanPaginationItems>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanPaginationItems {
    pub count: u32,
    pub total: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanAnime {
    pub mal_id: i32,
    pub url: String,
    pub images: JikanImages,
    pub title: String,
    #[serde(rename = "type", default)]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub episodes: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub aired: Option<JikanAired>,
    #[serde(default)]
    pub studios: Vec<JikanEntity>,
    #[serde(default)]
    pub genres: Vec<JikanEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanImages {
    pub jpg: JikanImageSet,
    #[serde(default)]
    pub webp: Option<JikanImageSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanImageSet {
    pub image_url: String,
    #[serde(default)]
    pub small_image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanAired {
    #[serde(default)]
    pub from: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub to: Option<DateTime<FixedOffset>>,
}

/// Studio, genre, producer: Jikan uses the same shape for all of them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanEntity {
    pub mal_id: i32,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    pub url: String,
}

/// The list-record attributes a client submits when adding this anime to a list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeListing {
    pub mal_id: i32,
    pub anime_name: String,
    pub image_url: String,
    pub episodes: Option<i32>,
    pub year_released: Option<i32>,
    pub studio: Option<String>,
    pub anime_genres: Vec<String>,
}

impl From<&JikanAnime> for AnimeListing {
    fn from(anime: &JikanAnime) -> Self {
        // Jikan leaves `year` empty for many non-seasonal releases
        let year_released = anime.year.or_else(|| {
            anime
                .aired
                .as_ref()
                .and_then(|aired| aired.from)
                .map(|from| from.year())
        });

        let mut seen = BTreeSet::new();
        let anime_genres = anime
            .genres
            .iter()
            .filter(|genre| seen.insert(genre.name.as_str()))
            .map(|genre| genre.name.clone())
            .collect();

        AnimeListing {
            mal_id: anime.mal_id,
            anime_name: anime.title.clone(),
            image_url: anime.images.jpg.image_url.clone(),
            episodes: anime.episodes,
            year_released,
            studio: anime.studios.first().map(|studio| studio.name.clone()),
            anime_genres,
        }
    }
}

/// Detail response: the raw catalog entry plus its derived listing
#[derive(Debug, Clone, Serialize)]
pub struct AnimeDetail {
    pub data: JikanAnime,
    pub listing: AnimeListing,
}
