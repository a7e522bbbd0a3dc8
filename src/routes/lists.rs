use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{ListPage, ListType, ProfileOverview},
    routes::{required_username, AppState},
    services::lists,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    username: Option<String>,
    list: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    username: Option<String>,
}

/// Handler for paginated list browsing
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<ListPage>> {
    let username = required_username(params.username)?;
    let list_type = params
        .list
        .as_deref()
        .and_then(|list| list.parse::<ListType>().ok())
        .ok_or_else(|| AppError::InvalidInput("Invalid Request Body".to_string()))?;
    let page = params
        .page
        .as_deref()
        .and_then(|page| page.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::InvalidInput("Invalid Page Parameter".to_string()))?;

    let page = lists::list_page(state.lists.clone(), &username, list_type, page).await?;
    Ok(Json(page))
}

/// Handler for the public profile overview
pub async fn profile(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> AppResult<Json<ProfileOverview>> {
    let username = required_username(params.username)?;
    let overview = lists::profile(state.lists.clone(), &username).await?;
    Ok(Json(overview))
}
