//! Jikan v4 catalog client
//!
//! Jikan is an unofficial MyAnimeList REST API. Only the endpoints the app
//! needs are wrapped:
//! 1. Browse: /top/anime?type=tv&filter={section}&page={page}
//! 2. Search: /anime?q={query}&status={status}&genres={ids}&page={page}&sfw=true
//! 3. Detail: /anime/{mal_id}

use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, JikanAnime, JikanAnimeResponse, JikanPage},
    services::catalog::{AiringStatus, AnimeCatalog, Section},
};

#[derive(Clone)]
pub struct JikanClient {
    http_client: HttpClient,
    api_url: String,
}

impl JikanClient {
    /// Creates a client whose requests give up after `timeout`
    pub fn new(api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        tracing::debug!(url = %url, "Fetching from Jikan");

        let response = self.http_client.get(&url).query(query).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Jikan has no resource at {}", path)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %url,
                status = %status,
                body = %body,
                "Jikan request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "Jikan returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

fn top_params(section: Section, page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("type", "tv".to_string()),
        ("filter", section.filter().to_string()),
        ("page", page.to_string()),
    ]
}

fn search_params(
    query: &str,
    status: Option<AiringStatus>,
    genres: &[Genre],
    page: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("q", query.to_string())];

    if let Some(status) = status {
        params.push(("status", status.as_str().to_string()));
    }

    let genre_ids = genres
        .iter()
        .map(|genre| genre.mal_id().to_string())
        .collect::<Vec<_>>()
        .join(",");
    params.push(("genres", genre_ids));
    params.push(("page", page.to_string()));
    params.push(("sfw", "true".to_string()));

    params
}

#[async_trait::async_trait]
impl AnimeCatalog for JikanClient {
    async fn top_animes(&self, section: Section, page: u32) -> AppResult<JikanPage> {
        self.get_json("/top/anime", &top_params(section, page)).await
    }

    async fn search(
        &self,
        query: &str,
        status: Option<AiringStatus>,
        genres: Vec<Genre>,
        page: u32,
    ) -> AppResult<JikanPage> {
        let results: JikanPage = self
            .get_json("/anime", &search_params(query, status, &genres, page))
            .await?;

        tracing::info!(
            query = %query,
            results = results.data.len(),
            "Catalog search completed"
        );

        Ok(results)
    }

    async fn anime(&self, mal_id: i32) -> AppResult<JikanAnime> {
        let response: JikanAnimeResponse = self.get_json(&format!("/anime/{}", mal_id), &[]).await?;
        Ok(response.data)
    }

    fn name(&self) -> &'static str {
        "jikan"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::{json, Value};

    /// Serves a stand-in Jikan on an ephemeral port and returns a client pointed at it
    async fn client_for_stub() -> JikanClient {
        let app = Router::new()
            .route(
                "/anime/1",
                get(|| async {
                    Json(json!({
                        "data": {
                            "mal_id": 1,
                            "url": "https://myanimelist.net/anime/1",
                            "images": { "jpg": { "image_url": "https://cdn.example/1.jpg" } },
                            "title": "Cowboy Bebop",
                            "episodes": 26
                        }
                    }))
                }),
            )
            .route(
                "/anime/2",
                get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            )
            .route(
                "/top/anime",
                get(|| async {
                    Json::<Value>(json!({
                        "data": [],
                        "pagination": { "last_visible_page": 1, "has_next_page": false }
                    }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        JikanClient::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_anime_decodes_success_body() {
        let client = client_for_stub().await;

        let anime = client.anime(1).await.unwrap();

        assert_eq!(anime.title, "Cowboy Bebop");
        assert_eq!(anime.episodes, Some(26));
    }

    #[tokio::test]
    async fn test_missing_anime_is_not_found() {
        let client = client_for_stub().await;

        let err = client.anime(999).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_external_api_error() {
        let client = client_for_stub().await;

        let err = client.anime(2).await.unwrap_err();

        match err {
            AppError::ExternalApi(msg) => assert!(msg.contains("500") && msg.contains("upstream exploded")),
            other => panic!("expected ExternalApi, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_top_animes_decodes_page() {
        let client = client_for_stub().await;

        let page = client.top_animes(Section::Airing, 1).await.unwrap();

        assert!(page.data.is_empty());
        assert!(!page.pagination.has_next_page);
    }

    #[test]
    fn test_top_params_for_popular() {
        let params = top_params(Section::Popular, 2);

        assert_eq!(
            params,
            vec![
                ("type", "tv".to_string()),
                ("filter", "bypopularity".to_string()),
                ("page", "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_map_genres_to_mal_ids() {
        let params = search_params(
            "steins gate",
            Some(AiringStatus::Complete),
            &[Genre::SciFi, Genre::Suspense],
            1,
        );

        assert!(params.contains(&("q", "steins gate".to_string())));
        assert!(params.contains(&("status", "complete".to_string())));
        assert!(params.contains(&("genres", "24,41".to_string())));
        assert!(params.contains(&("sfw", "true".to_string())));
    }

    #[test]
    fn test_search_params_without_status() {
        let params = search_params("k-on", None, &[], 1);

        assert!(params.iter().all(|(key, _)| *key != "status"));
        assert!(params.contains(&("genres", String::new())));
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client =
            JikanClient::new("https://api.jikan.moe/v4/".to_string(), Duration::from_secs(5))
                .unwrap();

        assert_eq!(client.api_url, "https://api.jikan.moe/v4");
        assert_eq!(client.name(), "jikan");
    }
}
