use std::{collections::BTreeSet, sync::Arc, time::Instant};

use crate::{
    db::ListRepository,
    error::AppResult,
    models::{AnalyticsReport, EpisodeGroup, Genre, ListRecord},
    services::users::resolve_user,
};

/// Builds the analytics report for a user's rating history
///
/// Fetches the user's `rate` records (restricted to one rating year if `year` is
/// given) and aggregates them. The list of years present in the history is only
/// attached when no year filter was requested, since a filtered fetch cannot
/// see the other years.
pub async fn user_analytics(
    repo: Arc<dyn ListRepository>,
    username: &str,
    year: Option<i32>,
) -> AppResult<AnalyticsReport> {
    let start = Instant::now();

    let user = resolve_user(repo.as_ref(), username).await?;
    let records = repo.rated_records(&user.id, year).await?;

    let report = aggregate(&records, year.is_none());

    tracing::info!(
        user_id = %user.id,
        year = ?year,
        record_count = records.len(),
        processing_time_us = start.elapsed().as_micros() as u64,
        "Analytics aggregated"
    );

    Ok(report)
}

/// Groups rated records into every chart dimension in a single pass
///
/// Absent fields leave the record out of that dimension only. Genre names
/// outside the known set are ignored; every known genre string contributes,
/// repeats included. With `include_years`, the distinct rating years are
/// attached in ascending order.
pub fn aggregate(records: &[ListRecord], include_years: bool) -> AnalyticsReport {
    let mut report = AnalyticsReport::default();
    let mut years = BTreeSet::new();

    for record in records {
        let entry = record.record_ref();

        if let Some(month) = record.month {
            report.bar.per_month.get_mut(month).push(entry.clone());
        }

        if let Some(rate) = record.rate {
            report.bar.per_rating.get_mut(rate).push(entry.clone());
        }

        if let Some(episodes) = record.episodes {
            report
                .bar
                .per_episode_group
                .get_mut(EpisodeGroup::classify(episodes))
                .push(entry.clone());
        }

        if let Some(year_released) = record.year_released {
            report
                .bar
                .per_year_released
                .entry(year_released)
                .or_default()
                .push(entry.clone());
        }

        for genre in record.anime_genres.iter().filter_map(|name| Genre::from_name(name)) {
            report.circle.genres.get_mut(genre).push(entry.clone());
        }

        if let Some(studio) = record.studio.as_deref().filter(|studio| !studio.is_empty()) {
            report
                .circle
                .studios
                .entry(studio.to_string())
                .or_default()
                .push(entry.clone());
        }

        if include_years {
            if let Some(year) = record.year {
                years.insert(year);
            }
        }
    }

    if include_years {
        report.years = Some(years.into_iter().collect());
    }

    report
}
