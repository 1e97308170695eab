//! Category enumeration for the home screen.

use chrono::{DateTime, Datelike, Local, TimeZone};
use serde::{Deserialize, Serialize};

use super::model::Category;
use crate::asset::PhotoAsset;
use crate::config::TriageConfig;

/// A category offered to the user, with its current size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category itself.
    pub category: Category,
    /// Display title.
    pub title: String,
    /// Number of photos a pass over this category would contain.
    pub asset_count: usize,
    /// URI of a representative photo, if one is known.
    pub cover_uri: Option<String>,
}

impl CategorySummary {
    fn new(category: Category, asset_count: usize, cover_uri: Option<String>) -> Self {
        Self {
            title: category.title(),
            category,
            asset_count,
            cover_uri,
        }
    }
}

/// Group the library into categories using the local clock.
#[must_use]
pub fn enumerate_categories(assets: &[PhotoAsset], config: &TriageConfig) -> Vec<CategorySummary> {
    enumerate_categories_at(assets, config, &Local::now())
}

/// Group the library into categories relative to `now`.
///
/// Order: All Photos, Recent, On This Day, Random, then calendar months from
/// the current one backwards. Empty categories are left out, except All
/// Photos which is always present.
#[must_use]
pub fn enumerate_categories_at<Tz: TimeZone>(
    assets: &[PhotoAsset],
    config: &TriageConfig,
    now: &DateTime<Tz>,
) -> Vec<CategorySummary> {
    let mut summaries = vec![CategorySummary::new(
        Category::All,
        assets.len(),
        assets.first().map(|a| a.uri.clone()),
    )];

    summaries.extend(matching_summary(
        Category::Recent {
            days: config.recent_days,
        },
        assets,
        now,
    ));
    summaries.extend(matching_summary(Category::OnThisDay, assets, now));

    let sample = config.random_sample_size.min(assets.len());
    if sample > 0 {
        summaries.push(CategorySummary::new(
            Category::Random {
                count: config.random_sample_size,
            },
            sample,
            None,
        ));
    }

    let (mut year, mut month) = (now.year(), now.month());
    for _ in 0..config.month_buckets {
        summaries.extend(matching_summary(Category::Month { year, month }, assets, now));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }

    summaries
}

fn matching_summary<Tz: TimeZone>(
    category: Category,
    assets: &[PhotoAsset],
    now: &DateTime<Tz>,
) -> Option<CategorySummary> {
    let mut matching = assets.iter().filter(|a| category.matches_at(a, now));
    let cover = matching.next()?;
    let count = 1 + matching.count();
    Some(CategorySummary::new(category, count, Some(cover.uri.clone())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn asset(id: &str, taken: DateTime<Utc>) -> PhotoAsset {
        PhotoAsset::new(id, taken, format!("file:///{id}.jpg"))
    }

    #[test]
    fn test_empty_library_only_lists_all_photos() {
        let summaries = enumerate_categories_at(&[], &TriageConfig::default(), &utc(2026, 10, 16));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].category, Category::All);
        assert_eq!(summaries[0].asset_count, 0);
        assert_eq!(summaries[0].cover_uri, None);
    }

    #[test]
    fn test_categories_in_display_order() {
        let assets = vec![
            asset("a", utc(2026, 10, 15)),
            asset("b", utc(2024, 10, 16)),
            asset("c", utc(2026, 9, 2)),
            asset("d", utc(2025, 12, 31)),
        ];
        let summaries =
            enumerate_categories_at(&assets, &TriageConfig::default(), &utc(2026, 10, 16));
        let ids: Vec<String> = summaries.iter().map(|s| s.category.id()).collect();

        assert_eq!(
            ids,
            vec![
                "all-photos",
                "recent-7days",
                "on-this-day",
                "random-50",
                "month-2026-10",
                "month-2026-9",
                "month-2025-12",
            ]
        );
        assert_eq!(summaries[3].asset_count, 4);
        assert_eq!(summaries[1].cover_uri.as_deref(), Some("file:///a.jpg"));
        assert_eq!(summaries[6].title, "December 2025");
    }

    #[test]
    fn test_month_buckets_limit_scan() {
        let assets = vec![asset("old", utc(2026, 7, 1))];
        let config = TriageConfig {
            month_buckets: 3,
            ..TriageConfig::default()
        };
        let summaries = enumerate_categories_at(&assets, &config, &utc(2026, 10, 16));
        assert!(
            summaries
                .iter()
                .all(|s| !matches!(s.category, Category::Month { .. }))
        );

        let config = TriageConfig {
            month_buckets: 4,
            ..config
        };
        let summaries = enumerate_categories_at(&assets, &config, &utc(2026, 10, 16));
        assert!(
            summaries
                .iter()
                .any(|s| s.category == Category::Month { year: 2026, month: 7 })
        );
    }
}
