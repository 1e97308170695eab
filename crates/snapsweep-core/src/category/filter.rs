//! Category filtering: turn the full library into one pass's working set.

use chrono::{DateTime, Datelike, Local, TimeDelta, TimeZone, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::model::Category;
use crate::asset::PhotoAsset;

impl Category {
    /// Filter `assets` down to this category's working set.
    ///
    /// Calendar comparisons use the local time zone and the random sample is
    /// drawn from a freshly seeded thread RNG, so two calls for
    /// [`Category::Random`] return different orders.
    #[must_use]
    pub fn filter(&self, assets: &[PhotoAsset]) -> Vec<PhotoAsset> {
        self.filter_at(assets, &Local::now(), &mut rand::rng())
    }

    /// Filter `assets` relative to `now`, drawing randomness from `rng`.
    ///
    /// Calendar fields of each asset are read in `now`'s time zone. Input
    /// order is preserved for every category except [`Category::Random`].
    #[must_use]
    pub fn filter_at<Tz, R>(
        &self,
        assets: &[PhotoAsset],
        now: &DateTime<Tz>,
        rng: &mut R,
    ) -> Vec<PhotoAsset>
    where
        Tz: TimeZone,
        R: Rng + ?Sized,
    {
        let selected = match self {
            Self::All => assets.to_vec(),
            Self::Random { count } => {
                let mut shuffled = assets.to_vec();
                shuffled.shuffle(rng);
                shuffled.truncate(*count);
                shuffled
            }
            Self::Recent { .. } | Self::OnThisDay | Self::Month { .. } => assets
                .iter()
                .filter(|asset| self.matches_at(asset, now))
                .cloned()
                .collect(),
        };

        debug!(
            category = %self,
            total = assets.len(),
            selected = selected.len(),
            "Filtered assets for category"
        );
        selected
    }

    /// Whether `asset` belongs to this category relative to `now`.
    ///
    /// Sampling categories match every asset; the sample is drawn by
    /// [`Category::filter_at`].
    pub(crate) fn matches_at<Tz: TimeZone>(
        &self,
        asset: &PhotoAsset,
        now: &DateTime<Tz>,
    ) -> bool {
        let taken = asset.creation_time.with_timezone(&now.timezone());

        match *self {
            Self::All | Self::Random { .. } => true,
            Self::Recent { days } => {
                let now = now.with_timezone(&Utc);
                // A window reaching past chrono's range covers everything.
                let start = TimeDelta::try_days(i64::from(days))
                    .and_then(|window| now.checked_sub_signed(window))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC);
                (start..=now).contains(&asset.creation_time)
            }
            Self::OnThisDay => {
                taken.day() == now.day()
                    && taken.month() == now.month()
                    && taken.year() < now.year()
            }
            Self::Month { year, month } => taken.year() == year && taken.month() == month,
        }
    }
}
