//! Category data model.

use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A slice of the photo library offered as one triage pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Category {
    /// The whole library, in provider order.
    #[default]
    All,
    /// A uniformly shuffled sample of at most `count` photos.
    Random {
        /// Maximum sample size.
        count: usize,
    },
    /// Photos taken within the last `days` days.
    Recent {
        /// Window length in days.
        days: u32,
    },
    /// Photos taken on today's calendar date in earlier years.
    OnThisDay,
    /// Photos taken in one calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Calendar month, 1-12.
        month: u32,
    },
}

impl Category {
    /// Parse a category id.
    ///
    /// Accepted forms: `all-photos`, `random-N`, `recent-D` (or
    /// `recent-Ddays`), `on-this-day` and `month-YYYY-M` with a 1-based
    /// month. Anything unrecognized, including malformed numbers, selects
    /// the whole library.
    ///
    /// Months count from 1, so `month-2024-0` is not January: it selects
    /// the whole library. Hosts carrying ids that count months from 0 must
    /// add one before parsing.
    #[must_use]
    pub fn parse(id: &str) -> Self {
        let id = id.trim().to_lowercase();

        if id == "on-this-day" {
            return Self::OnThisDay;
        }
        if let Some(count) = id
            .strip_prefix("random-")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n > 0)
        {
            return Self::Random { count };
        }
        if let Some(days) = id
            .strip_prefix("recent-")
            .map(|d| d.strip_suffix("days").unwrap_or(d))
            .and_then(|d| d.parse::<u32>().ok())
            .filter(|d| *d > 0)
        {
            return Self::Recent { days };
        }
        if let Some(category) = id.strip_prefix("month-").and_then(parse_month) {
            return category;
        }

        Self::All
    }

    /// Canonical string id, accepted back by [`Category::parse`].
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::All => "all-photos".to_string(),
            Self::Random { count } => format!("random-{count}"),
            Self::Recent { days } => format!("recent-{days}days"),
            Self::OnThisDay => "on-this-day".to_string(),
            Self::Month { year, month } => format!("month-{year}-{month}"),
        }
    }

    /// Human-readable title.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::All => "All Photos".to_string(),
            Self::Random { count } => format!("Random {count}"),
            Self::Recent { days: 1 } => "Recent (Last Day)".to_string(),
            Self::Recent { days } => format!("Recent (Last {days} Days)"),
            Self::OnThisDay => "On This Day".to_string(),
            Self::Month { year, month } => {
                let name = month
                    .checked_sub(1)
                    .and_then(|i| MONTH_NAMES.get(i as usize))
                    .copied()
                    .unwrap_or("Unknown");
                format!("{name} {year}")
            }
        }
    }
}

fn parse_month(rest: &str) -> Option<Category> {
    let (year, month) = rest.split_once('-')?;
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok().filter(|m| (1..=12).contains(m))?;
    Some(Category::Month { year, month })
}

impl std::str::FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id())
    }
}
