use serde::{ser::SerializeMap, Serialize, Serializer};
use std::{collections::BTreeMap, marker::PhantomData, str::FromStr};

use crate::{
    error::AppError,
    models::list_record::{Month, Rating, RecordRef},
};

/// A closed set of bucket keys for a fixed-key dimension.
///
/// `ALL` lists the keys in display order and `index` must return each key's
/// position in `ALL`.
pub trait BucketKey: Copy + 'static {
    const ALL: &'static [Self];

    fn index(self) -> usize;

    fn label(self) -> &'static str;
}

impl BucketKey for Month {
    const ALL: &'static [Self] = &Month::ALL;

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        self.abbreviation()
    }
}

impl BucketKey for Rating {
    const ALL: &'static [Self] = &Rating::ALL;

    fn index(self) -> usize {
        self.stars() as usize
    }

    fn label(self) -> &'static str {
        const LABELS: [&str; 6] = ["0", "1", "2", "3", "4", "5"];
        LABELS[self.index()]
    }
}

/// Episode-count ranges used for the "Animes Per Episode Group" chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpisodeGroup {
    UpTo12,
    UpTo24,
    Over24,
}

impl EpisodeGroup {
    /// 1..=12 is "0-12", 13..=24 is "12-24". Everything else, including
    /// zero and negative counts, lands in "24+".
    pub fn classify(episodes: i32) -> Self {
        match episodes {
            1..=12 => EpisodeGroup::UpTo12,
            13..=24 => EpisodeGroup::UpTo24,
            _ => EpisodeGroup::Over24,
        }
    }
}

impl BucketKey for EpisodeGroup {
    const ALL: &'static [Self] = &[
        EpisodeGroup::UpTo12,
        EpisodeGroup::UpTo24,
        EpisodeGroup::Over24,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            EpisodeGroup::UpTo12 => "0-12",
            EpisodeGroup::UpTo24 => "12-24",
            EpisodeGroup::Over24 => "24+",
        }
    }
}

/// Genres tracked by the "Most Watched Genres" chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Adventure,
    AvantGarde,
    AwardWinning,
    BoysLove,
    Comedy,
    Drama,
    Fantasy,
    GirlsLove,
    Gourmet,
    Horror,
    Mystery,
    Romance,
    SciFi,
    SliceOfLife,
    Sports,
    Supernatural,
    Suspense,
    Ecchi,
}

impl Genre {
    pub const ALL: [Genre; 19] = [
        Genre::Action,
        Genre::Adventure,
        Genre::AvantGarde,
        Genre::AwardWinning,
        Genre::BoysLove,
        Genre::Comedy,
        Genre::Drama,
        Genre::Fantasy,
        Genre::GirlsLove,
        Genre::Gourmet,
        Genre::Horror,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::SliceOfLife,
        Genre::Sports,
        Genre::Supernatural,
        Genre::Suspense,
        Genre::Ecchi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::AvantGarde => "Avant Garde",
            Genre::AwardWinning => "Award Winning",
            Genre::BoysLove => "Boys Love",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::GirlsLove => "Girls Love",
            Genre::Gourmet => "Gourmet",
            Genre::Horror => "Horror",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::SliceOfLife => "Slice of Life",
            Genre::Sports => "Sports",
            Genre::Supernatural => "Supernatural",
            Genre::Suspense => "Suspense",
            Genre::Ecchi => "Ecchi",
        }
    }

    /// Exact, case-sensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Genre::ALL.into_iter().find(|genre| genre.name() == name)
    }

    /// MyAnimeList genre id, used for catalog search filters
    pub fn mal_id(&self) -> u32 {
        match self {
            Genre::Action => 1,
            Genre::Adventure => 2,
            Genre::AvantGarde => 5,
            Genre::AwardWinning => 46,
            Genre::BoysLove => 28,
            Genre::Comedy => 4,
            Genre::Drama => 8,
            Genre::Fantasy => 10,
            Genre::GirlsLove => 26,
            Genre::Gourmet => 47,
            Genre::Horror => 14,
            Genre::Mystery => 7,
            Genre::Romance => 22,
            Genre::SciFi => 24,
            Genre::SliceOfLife => 36,
            Genre::Sports => 30,
            Genre::Supernatural => 37,
            Genre::Suspense => 41,
            Genre::Ecchi => 9,
        }
    }
}

impl FromStr for Genre {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::from_name(s).ok_or_else(|| AppError::InvalidInput(format!("Unknown genre: {}", s)))
    }
}

impl BucketKey for Genre {
    const ALL: &'static [Self] = &Genre::ALL;

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        self.name()
    }
}

/// One slot per key of a closed dimension, serialized as an object in key order
#[derive(Debug, Clone, PartialEq)]
pub struct FixedBuckets<K, V> {
    slots: Vec<V>,
    _key: PhantomData<K>,
}

impl<K: BucketKey, V: Default> Default for FixedBuckets<K, V> {
    fn default() -> Self {
        Self {
            slots: K::ALL.iter().map(|_| V::default()).collect(),
            _key: PhantomData,
        }
    }
}

impl<K: BucketKey, V> FixedBuckets<K, V> {
    pub fn get(&self, key: K) -> &V {
        &self.slots[key.index()]
    }

    pub fn get_mut(&mut self, key: K) -> &mut V {
        &mut self.slots[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        K::ALL.iter().copied().zip(self.slots.iter())
    }

    pub fn map<U>(&self, f: impl Fn(&V) -> U) -> FixedBuckets<K, U> {
        FixedBuckets {
            slots: self.slots.iter().map(f).collect(),
            _key: PhantomData,
        }
    }
}

impl<K: BucketKey, V: Serialize> Serialize for FixedBuckets<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.label(), value)?;
        }
        map.end()
    }
}

/// The records that fell into one sub-key of a dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bucket(Vec<RecordRef>);

impl Bucket {
    pub fn push(&mut self, record: RecordRef) {
        self.0.push(record);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[RecordRef] {
        &self.0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|record| record.id == id)
    }
}

/// Bar-chart dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarDimensions<V> {
    #[serde(rename = "Animes Per Month")]
    pub per_month: FixedBuckets<Month, V>,
    #[serde(rename = "Animes Per Rating")]
    pub per_rating: FixedBuckets<Rating, V>,
    #[serde(rename = "Animes Per Episode Group")]
    pub per_episode_group: FixedBuckets<EpisodeGroup, V>,
    #[serde(rename = "Animes Per Year Released")]
    pub per_year_released: BTreeMap<i32, V>,
}

/// Pie-chart dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CircleDimensions<V> {
    #[serde(rename = "Most Watched Genres")]
    pub genres: FixedBuckets<Genre, V>,
    #[serde(rename = "Most Watched Studios")]
    pub studios: BTreeMap<String, V>,
}

/// A user's rating history broken down by dimension.
///
/// `V` is the per-bucket value: [`Bucket`] for drill-down views, `usize` for charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analytics<V> {
    pub bar: BarDimensions<V>,
    pub circle: CircleDimensions<V>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<i32>>,
}

pub type AnalyticsReport = Analytics<Bucket>;
pub type AnalyticsSummary = Analytics<usize>;

impl AnalyticsReport {
    /// Collapses every bucket to its record count
    pub fn summarize(&self) -> AnalyticsSummary {
        let count = |bucket: &Bucket| bucket.len();

        Analytics {
            bar: BarDimensions {
                per_month: self.bar.per_month.map(count),
                per_rating: self.bar.per_rating.map(count),
                per_episode_group: self.bar.per_episode_group.map(count),
                per_year_released: self
                    .bar
                    .per_year_released
                    .iter()
                    .map(|(year, bucket)| (*year, bucket.len()))
                    .collect(),
            },
            circle: CircleDimensions {
                genres: self.circle.genres.map(count),
                studios: self
                    .circle
                    .studios
                    .iter()
                    .map(|(studio, bucket)| (studio.clone(), bucket.len()))
                    .collect(),
            },
            years: self.years.clone(),
        }
    }
}
