use std::sync::Arc;

use crate::{
    db::ListRepository,
    error::{AppError, AppResult},
    models::{normalize_username, ListPage, ListType, ProfileOverview},
    services::users::resolve_user,
};

/// Records per page when browsing a list
pub const LIST_PAGE_SIZE: i64 = 18;

/// Records per list shown on a profile
pub const PROFILE_PREVIEW_LIMIT: i64 = 10;

/// Returns one page (1-based) of a user's list along with the total page count
pub async fn list_page(
    repo: Arc<dyn ListRepository>,
    username: &str,
    list_type: ListType,
    page: i64,
) -> AppResult<ListPage> {
    let offset = page_offset(page)
        .ok_or_else(|| AppError::InvalidInput("Invalid Page Parameter".to_string()))?;

    let user = resolve_user(repo.as_ref(), username).await?;

    let list = repo
        .list_records(&user.id, list_type, offset, LIST_PAGE_SIZE)
        .await?;
    let total = repo.count_records(&user.id, list_type).await?;

    tracing::debug!(
        user_id = %user.id,
        list_type = %list_type,
        page,
        total,
        "Fetched list page"
    );

    Ok(ListPage {
        list,
        pages: page_count(total),
    })
}

/// Builds a user's public profile: a short preview of each list plus bio and image
pub async fn profile(repo: Arc<dyn ListRepository>, username: &str) -> AppResult<ProfileOverview> {
    let username = normalize_username(username);
    let user = resolve_user(repo.as_ref(), &username).await?;

    let watch = repo
        .preview_records(&user.id, ListType::Watch, PROFILE_PREVIEW_LIMIT)
        .await?;
    let plan = repo
        .preview_records(&user.id, ListType::Plan, PROFILE_PREVIEW_LIMIT)
        .await?;
    let rate = repo
        .preview_records(&user.id, ListType::Rate, PROFILE_PREVIEW_LIMIT)
        .await?;

    Ok(ProfileOverview {
        watch,
        plan,
        rate,
        bio: user.bio,
        image: user.image,
    })
}

/// Row offset of a 1-based page, `None` for pages below 1 or past `i64` range
fn page_offset(page: i64) -> Option<i64> {
    if page < 1 {
        return None;
    }
    page.checked_sub(1)?.checked_mul(LIST_PAGE_SIZE)
}

fn page_count(total: i64) -> i64 {
    (total + LIST_PAGE_SIZE - 1) / LIST_PAGE_SIZE
}
