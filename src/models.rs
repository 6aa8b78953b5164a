//! Data models flowing through the scrape pipeline.
//!
//! - [`ScrapeRequest`]: the caller's input (a calendar date)
//! - [`UrlCandidate`]: one URL worth trying for a date
//! - [`RawPage`]: HTML as fetched, before parsing
//! - [`NormalizedEntry`]: one live-blog entry, ready for display
//! - [`ScrapeResult`]: everything the presentation layer receives
//!
//! Output types serialize with camelCase field names so the JSON output reads
//! the same as the record layout handed to renderers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Input to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeRequest {
    /// Day whose live blog should be rendered.
    pub target_date: NaiveDate,
}

impl ScrapeRequest {
    pub fn new(target_date: NaiveDate) -> Self {
        Self { target_date }
    }
}

/// A fully formed URL and the date it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCandidate {
    pub url: String,
    pub date: NaiveDate,
}

/// Raw HTML returned by a fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// Document text.
    pub html: String,
    /// URL that yielded the document.
    pub source_url: String,
}

/// An image paired with its caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionedImage {
    pub image_url: String,
    pub caption: String,
}

/// One live-blog entry after normalization.
///
/// `body_markdown` never contains the markup that produced `byline`, `media`
/// or any of the `captioned_images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEntry {
    /// Id attribute of the source element (`liveblog-entry-<n>`).
    pub entry_id: String,
    /// Publication instant.
    pub timestamp_utc: DateTime<Utc>,
    /// `timestamp_utc` in US Eastern time, `hh:mm:ss AM`.
    pub timestamp_local: String,
    pub title: String,
    /// Absolute permalink to the entry.
    pub source_link: String,
    /// Attribution, as markdown.
    pub byline: Option<String>,
    /// Lead image, distinct from in-body figures.
    pub media: Option<CaptionedImage>,
    /// In-body figures, in document order.
    pub captioned_images: Vec<CaptionedImage>,
    pub body_markdown: String,
}

/// Page-level heading text, when the page exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub headline: String,
    pub subheadline: Option<String>,
}

/// An entry that was dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntry {
    pub entry_id: String,
    pub reason: String,
}

/// Everything the presentation layer needs for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub metadata: Option<PageMetadata>,
    /// Entries in document order.
    pub entries: Vec<NormalizedEntry>,
    /// URL that actually produced the page.
    pub resolved_url: String,
    /// Date the resolved URL stands for (the requested date or an earlier one).
    pub resolved_date: NaiveDate,
    /// Number of entries dropped as malformed.
    pub skipped: usize,
    /// One record per dropped entry.
    pub warnings: Vec<SkippedEntry>,
}
