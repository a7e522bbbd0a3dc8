pub mod analytics;
pub mod jikan;
pub mod list_record;
pub mod user;

pub use analytics::{
    Analytics, AnalyticsReport, AnalyticsSummary, BarDimensions, Bucket, BucketKey,
    CircleDimensions, EpisodeGroup, FixedBuckets, Genre,
};
pub use jikan::{AnimeDetail, AnimeListing, JikanAnime, JikanAnimeResponse, JikanPage};
pub use list_record::{ListRecord, ListRow, ListType, Month, Rating, RecordRef};
pub use user::{normalize_username, ProfileOverview, User};

/// A single page of one of a user's lists
#[derive(Debug, Clone, serde::Serialize)]
pub struct ListPage {
    pub list: Vec<ListRecord>,
    pub pages: i64,
}
