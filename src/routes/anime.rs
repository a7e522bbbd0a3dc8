use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{AnimeDetail, Genre, JikanPage},
    routes::AppState,
    services::catalog::{self, AiringStatus, Section},
};

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    section: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
    status: Option<String>,
    genres: Option<String>,
    page: Option<String>,
}

fn parse_page(page: Option<&str>) -> AppResult<u32> {
    match page {
        None => Ok(1),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|page| *page >= 1)
            .ok_or_else(|| AppError::InvalidInput("Invalid Page Parameter".to_string())),
    }
}

/// Comma-separated genre names, e.g. `Action,Slice of Life`
fn parse_genres(genres: Option<&str>) -> AppResult<Vec<Genre>> {
    genres
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse::<Genre>)
        .collect()
}

/// Handler for the browse sections (airing, popular, upcoming)
pub async fn top(
    State(state): State<AppState>,
    Query(params): Query<TopQuery>,
) -> AppResult<Json<JikanPage>> {
    let section = params
        .section
        .as_deref()
        .ok_or_else(|| AppError::InvalidInput("You need an anime type.".to_string()))?
        .parse::<Section>()?;
    let page = parse_page(params.page.as_deref())?;

    let results = state.catalog.top_animes(section, page).await?;
    Ok(Json(results))
}

/// Handler for catalog search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<JikanPage>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<AiringStatus>)
        .transpose()?;
    let genres = parse_genres(params.genres.as_deref())?;
    let page = parse_page(params.page.as_deref())?;

    let results = state
        .catalog
        .search(params.q.trim(), status, genres, page)
        .await?;
    Ok(Json(results))
}

/// Handler for a single anime with its derived listing
pub async fn detail(
    State(state): State<AppState>,
    Path(mal_id): Path<i32>,
) -> AppResult<Json<AnimeDetail>> {
    let detail = catalog::anime_detail(state.catalog.clone(), mal_id).await?;
    Ok(Json(detail))
}
