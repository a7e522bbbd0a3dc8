use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// Which of a user's lists a record lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Watch,
    Plan,
    Rate,
}

impl ListType {
    pub const ALL: [ListType; 3] = [ListType::Watch, ListType::Plan, ListType::Rate];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::Watch => "watch",
            ListType::Plan => "plan",
            ListType::Rate => "rate",
        }
    }
}

impl Display for ListType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "watch" => Ok(ListType::Watch),
            "plan" => Ok(ListType::Plan),
            "rate" => Ok(ListType::Rate),
            other => Err(AppError::InvalidInput(format!("Unknown list type: {}", other))),
        }
    }
}

/// Month a rating was recorded, stored as its three-letter abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl FromStr for Month {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .into_iter()
            .find(|month| month.abbreviation() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown month: {}", s)))
    }
}

/// Star rating in 0..=5. Zero is kept as its own value and is not the same as "unrated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub const ALL: [Rating; 6] = [
        Rating(0),
        Rating(1),
        Rating(2),
        Rating(3),
        Rating(4),
        Rating(5),
    ];

    pub fn new(stars: u8) -> Option<Self> {
        (stars <= Self::MAX).then_some(Rating(stars))
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i16> for Rating {
    type Error = AppError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Rating::new)
            .ok_or_else(|| AppError::InvalidInput(format!("Rating {} is out of range", value)))
    }
}

/// Identifying and display fields of a record, carried into every analytics bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecordRef {
    pub id: String,
    pub mal_id: i32,
    pub image_url: String,
}

/// One anime tracked by a user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecord {
    pub id: String,
    pub mal_id: i32,
    pub anime_name: String,
    pub image_url: String,
    pub list_type: ListType,
    pub rate: Option<Rating>,
    pub month: Option<Month>,
    pub year: Option<i32>,
    pub year_released: Option<i32>,
    pub episodes: Option<i32>,
    pub anime_genres: Vec<String>,
    pub studio: Option<String>,
}

impl ListRecord {
    pub fn record_ref(&self) -> RecordRef {
        RecordRef {
            id: self.id.clone(),
            mal_id: self.mal_id,
            image_url: self.image_url.clone(),
        }
    }
}

/// Raw `lists` row as stored in Postgres
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListRow {
    pub id: String,
    pub mal_id: i32,
    pub anime_name: String,
    pub image_url: String,
    pub list_type: String,
    pub rate: Option<i16>,
    pub month: Option<String>,
    pub year: Option<i32>,
    pub year_released: Option<i32>,
    pub episodes: Option<i32>,
    pub anime_genres: Vec<String>,
    pub studio: Option<String>,
}

impl TryFrom<ListRow> for ListRecord {
    type Error = AppError;

    fn try_from(row: ListRow) -> Result<Self, Self::Error> {
        let invalid = |reason: AppError| AppError::InvalidRecord {
            id: row.id.clone(),
            reason: reason.to_string(),
        };

        let list_type = row.list_type.parse::<ListType>().map_err(invalid)?;
        let rate = row.rate.map(Rating::try_from).transpose().map_err(invalid)?;
        let month = row
            .month
            .as_deref()
            .map(str::parse::<Month>)
            .transpose()
            .map_err(invalid)?;

        Ok(ListRecord {
            id: row.id,
            mal_id: row.mal_id,
            anime_name: row.anime_name,
            image_url: row.image_url,
            list_type,
            rate,
            month,
            year: row.year,
            year_released: row.year_released,
            episodes: row.episodes,
            anime_genres: row.anime_genres,
            // Empty studio names count as absent
            studio: row.studio.filter(|studio| !studio.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ListRow {
        ListRow {
            id: "rec-1".to_string(),
            mal_id: 5114,
            anime_name: "Fullmetal Alchemist: Brotherhood".to_string(),
            image_url: "https://cdn.myanimelist.net/images/anime/1208/94745.jpg".to_string(),
            list_type: "rate".to_string(),
            rate: Some(5),
            month: Some("Mar".to_string()),
            year: Some(2023),
            year_released: Some(2009),
            episodes: Some(64),
            anime_genres: vec!["Action".to_string(), "Adventure".to_string()],
            studio: Some("Bones".to_string()),
        }
    }

    #[test]
    fn test_row_converts_to_record() {
        let record = ListRecord::try_from(row()).unwrap();

        assert_eq!(record.list_type, ListType::Rate);
        assert_eq!(record.rate, Rating::new(5));
        assert_eq!(record.month, Some(Month::Mar));
        assert_eq!(record.studio.as_deref(), Some("Bones"));
    }

    #[test]
    fn test_row_with_rate_out_of_range_is_rejected() {
        let mut bad = row();
        bad.rate = Some(6);

        let err = ListRecord::try_from(bad).unwrap_err();
        assert!(matches!(err, AppError::InvalidRecord { ref id, .. } if id == "rec-1"));
    }

    #[test]
    fn test_row_with_negative_rate_is_rejected() {
        let mut bad = row();
        bad.rate = Some(-1);

        assert!(ListRecord::try_from(bad).is_err());
    }

    #[test]
    fn test_row_with_unknown_month_is_rejected() {
        let mut bad = row();
        bad.month = Some("January".to_string());

        assert!(ListRecord::try_from(bad).is_err());
    }

    #[test]
    fn test_row_with_unknown_list_type_is_rejected() {
        let mut bad = row();
        bad.list_type = "delete".to_string();

        assert!(ListRecord::try_from(bad).is_err());
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let mut sparse = row();
        sparse.rate = None;
        sparse.month = None;
        sparse.studio = Some(String::new());

        let record = ListRecord::try_from(sparse).unwrap();
        assert_eq!(record.rate, None);
        assert_eq!(record.month, None);
        assert_eq!(record.studio, None);
    }

    #[test]
    fn test_rating_zero_is_valid() {
        assert_eq!(Rating::new(0).map(|r| r.stars()), Some(0));
        assert_eq!(Rating::new(6), None);
    }

    #[test]
    fn test_list_type_round_trips_through_str() {
        for list_type in ListType::ALL {
            assert_eq!(list_type.as_str().parse::<ListType>().unwrap(), list_type);
        }
    }

    #[test]
    fn test_record_ref_serializes_camel_case() {
        let record = ListRecord::try_from(row()).unwrap();
        let json = serde_json::to_value(record.record_ref()).unwrap();

        assert_eq!(json["malId"], 5114);
        assert_eq!(json["id"], "rec-1");
        assert!(json.get("imageUrl").is_some());
    }
}
