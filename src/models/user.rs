use serde::Serialize;

use crate::models::list_record::RecordRef;

/// A registered user as far as the read-only API is concerned
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

/// Profile URLs carry usernames with spaces written as dashes
pub fn normalize_username(raw: &str) -> String {
    raw.split('-').collect::<Vec<_>>().join(" ")
}

/// Public profile overview: a preview of each list plus bio and avatar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileOverview {
    pub watch: Vec<RecordRef>,
    pub plan: Vec<RecordRef>,
    pub rate: Vec<RecordRef>,
    pub bio: Option<String>,
    pub image: Option<String>,
}
