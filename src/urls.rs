//! URL candidates for a live-blog date.
//!
//! The site names each day's page `<prefix><month>-<day>-<year>`, e.g.
//! `liveblog-march-5-2024`. Historically the day has appeared both with and
//! without zero padding, so every date yields two candidates. Padding is
//! computed directly from the day number rather than through a platform
//! `strftime` flag, so the output does not depend on the host.

use crate::config::ScraperConfig;
use crate::models::UrlCandidate;
use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Day-of-month formatting convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStyle {
    /// `5`
    Unpadded,
    /// `05`
    ZeroPadded,
}

impl DayStyle {
    fn format(self, day: u32) -> String {
        match self {
            DayStyle::Unpadded => day.to_string(),
            DayStyle::ZeroPadded => format!("{day:02}"),
        }
    }
}

/// Builds candidate URLs for a date.
#[derive(Debug, Clone)]
pub struct UrlCandidateGenerator {
    base_url: String,
    slug_prefix: String,
}

impl UrlCandidateGenerator {
    pub fn new(base_url: impl Into<String>, slug_prefix: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            slug_prefix: slug_prefix.into(),
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(&config.base_url, &config.slug_prefix)
    }

    /// Both candidates for `date`, preferred convention first.
    ///
    /// Always returns exactly two candidates. For days 10 and above the two
    /// URLs are identical; callers that fetch should skip repeats.
    pub fn generate(&self, date: NaiveDate) -> Vec<UrlCandidate> {
        let (primary, alternate) = Self::conventions(date);
        [primary, alternate]
            .into_iter()
            .map(|style| UrlCandidate {
                url: format!("{}/{}", self.base_url, self.slug(date, style)),
                date,
            })
            .collect()
    }

    /// November pages have been published zero-padded; every other month
    /// mostly unpadded.
    fn conventions(date: NaiveDate) -> (DayStyle, DayStyle) {
        if date.month() == 11 {
            (DayStyle::ZeroPadded, DayStyle::Unpadded)
        } else {
            (DayStyle::Unpadded, DayStyle::ZeroPadded)
        }
    }

    fn slug(&self, date: NaiveDate, style: DayStyle) -> String {
        format!(
            "{}{}-{}-{}",
            self.slug_prefix,
            MONTHS[date.month0() as usize],
            style.format(date.day()),
            date.year()
        )
    }
}

impl Default for UrlCandidateGenerator {
    fn default() -> Self {
        Self::from_config(&ScraperConfig::default())
    }
}
