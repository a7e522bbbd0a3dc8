use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::ListRepository,
    error::{AppError, AppResult},
    middleware::{make_span_with_request_id, request_id_middleware},
    services::catalog::AnimeCatalog,
};

pub mod analytics;
pub mod anime;
pub mod lists;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub lists: Arc<dyn ListRepository>,
    pub catalog: Arc<dyn AnimeCatalog>,
}

impl AppState {
    pub fn new(lists: Arc<dyn ListRepository>, catalog: Arc<dyn AnimeCatalog>) -> Self {
        Self { lists, catalog }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(analytics::analytics))
        .route("/list", get(lists::list))
        .route("/user/profile", get(lists::profile))
        .route("/anime/top", get(anime::top))
        .route("/anime/search", get(anime::search))
        .route("/anime/:mal_id", get(anime::detail))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Extracts a required, non-empty username query parameter
fn required_username(username: Option<String>) -> AppResult<String> {
    username
        .filter(|username| !username.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Invalid Request.".to_string()))
}
