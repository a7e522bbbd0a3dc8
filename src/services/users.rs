use crate::{
    db::ListRepository,
    error::{AppError, AppResult},
    models::User,
};

/// Resolves a username to a user, failing with `UserNotFound` when nobody has that name
pub async fn resolve_user(repo: &dyn ListRepository, username: &str) -> AppResult<User> {
    repo.find_user_by_username(username)
        .await?
        .ok_or_else(|| AppError::UserNotFound(username.to_string()))
}
