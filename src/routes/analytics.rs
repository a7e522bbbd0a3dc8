use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    routes::{required_username, AppState},
    services::analytics,
};

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    username: Option<String>,
    year: Option<String>,
    view: Option<String>,
}

/// How buckets are rendered in the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnalyticsView {
    /// Each bucket lists its `{id, malId, imageUrl}` entries
    Detail,
    /// Each bucket is a count
    Count,
}

fn parse_view(view: Option<&str>) -> AppResult<AnalyticsView> {
    match view {
        None | Some("detail") => Ok(AnalyticsView::Detail),
        Some("count") => Ok(AnalyticsView::Count),
        Some(other) => Err(AppError::InvalidInput(format!("Unknown view: {}", other))),
    }
}

fn parse_year(year: &str) -> AppResult<i32> {
    year.trim()
        .parse::<i32>()
        .map_err(|_| AppError::InvalidInput("Year is invalid.".to_string()))
}

/// Handler for the analytics endpoint
///
/// Without `year` the whole rating history is aggregated and the response
/// carries the list of years present; with `year` only that year's ratings are.
pub async fn analytics(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(params): Query<AnalyticsQuery>,
) -> AppResult<Response> {
    let username = required_username(params.username)?;
    let year = params.year.as_deref().map(parse_year).transpose()?;
    let view = parse_view(params.view.as_deref())?;

    tracing::info!(
        request_id = %request_id,
        username = %username,
        year = ?year,
        view = ?view,
        "Processing analytics request"
    );

    let report = analytics::user_analytics(state.lists.clone(), &username, year).await?;

    let response = match view {
        AnalyticsView::Detail => Json(report).into_response(),
        AnalyticsView::Count => Json(report.summarize()).into_response(),
    };

    Ok(response)
}
