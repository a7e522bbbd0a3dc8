use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{ListRecord, ListRow, ListType, RecordRef, User},
};

const RECORD_COLUMNS: &str = "id, mal_id, anime_name, image_url, list_type, rate, month, year, \
                              year_released, episodes, anime_genres, studio";

/// Read access to users and their anime lists
///
/// Handlers receive this as a trait object so tests can substitute an in-memory store.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ListRepository: Send + Sync {
    /// Looks up a user by exact username
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// All `rate` records of a user, restricted to one rating year when `year` is given
    async fn rated_records(&self, user_id: &str, year: Option<i32>) -> AppResult<Vec<ListRecord>>;

    /// One window of a user's list, in insertion order
    async fn list_records(
        &self,
        user_id: &str,
        list_type: ListType,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<ListRecord>>;

    /// Number of records in one of a user's lists
    async fn count_records(&self, user_id: &str, list_type: ListType) -> AppResult<i64>;

    /// The first `limit` entries of a list for profile previews.
    /// Rated entries come most recent rating year first, undated ones ahead of all.
    async fn preview_records(
        &self,
        user_id: &str,
        list_type: ListType,
        limit: i64,
    ) -> AppResult<Vec<RecordRef>>;
}

/// Postgres-backed list repository
#[derive(Clone)]
pub struct PgListRepository {
    pool: PgPool,
}

impl PgListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Converts stored rows into records, dropping rows that fail validation
fn into_records(rows: Vec<ListRow>) -> Vec<ListRecord> {
    rows.into_iter()
        .filter_map(|row| match ListRecord::try_from(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid list record");
                None
            }
        })
        .collect()
}

/// ORDER BY clause for profile previews. Postgres sorts NULL years first under DESC.
fn preview_order(list_type: ListType) -> &'static str {
    match list_type {
        ListType::Rate => "year DESC, created_at",
        ListType::Watch | ListType::Plan => "created_at, id",
    }
}

#[async_trait::async_trait]
impl ListRepository for PgListRepository {
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, bio, image
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn rated_records(&self, user_id: &str, year: Option<i32>) -> AppResult<Vec<ListRecord>> {
        let sql = format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM lists
            WHERE user_id = $1
              AND list_type = 'rate'
              AND ($2::INTEGER IS NULL OR year = $2)
            "#
        );

        let rows = sqlx::query_as::<_, ListRow>(&sql)
            .bind(user_id)
            .bind(year)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(user_id = %user_id, year = ?year, rows = rows.len(), "Fetched rated records");

        Ok(into_records(rows))
    }

    async fn list_records(
        &self,
        user_id: &str,
        list_type: ListType,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<ListRecord>> {
        let sql = format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM lists
            WHERE user_id = $1 AND list_type = $2
            ORDER BY created_at, id
            OFFSET $3
            LIMIT $4
            "#
        );

        let rows = sqlx::query_as::<_, ListRow>(&sql)
            .bind(user_id)
            .bind(list_type.as_str())
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(into_records(rows))
    }

    async fn count_records(&self, user_id: &str, list_type: ListType) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM lists
            WHERE user_id = $1 AND list_type = $2
            "#,
        )
        .bind(user_id)
        .bind(list_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn preview_records(
        &self,
        user_id: &str,
        list_type: ListType,
        limit: i64,
    ) -> AppResult<Vec<RecordRef>> {
        let order_by = preview_order(list_type);
        let sql = format!(
            r#"
            SELECT id, mal_id, image_url
            FROM lists
            WHERE user_id = $1 AND list_type = $2
            ORDER BY {order_by}
            LIMIT $3
            "#
        );

        let previews = sqlx::query_as::<_, RecordRef>(&sql)
            .bind(user_id)
            .bind(list_type.as_str())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(previews)
    }
}
