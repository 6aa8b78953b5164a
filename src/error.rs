//! Error taxonomy for the scrape pipeline.
//!
//! Each stage has its own error type so the orchestrator can decide how far a
//! failure propagates:
//!
//! | Error | Scope | Recovery |
//! |-------|-------|----------|
//! | [`FetchError`] | one URL candidate | try the next candidate, then roll back a day |
//! | [`StructureError`] | one fetched page | roll back a day |
//! | [`MalformedEntryError`] | one entry | skip the entry, count it |
//! | [`ScrapeError`] | whole request | surfaced to the caller |

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Failure to retrieve HTML for a single URL.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("browser rendering failed: {0}")]
    Browser(String),

    #[error("no browser renderer configured")]
    RendererUnavailable,

    #[error("rendering {url} exceeded {secs}s")]
    Deadline { url: String, secs: u64 },
}

/// The fetched page does not carry the expected live-blog markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("no live-blog container found in {url}")]
    MissingContainer { url: String },
}

/// One entry is missing a mandatory field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedEntryError {
    #[error("entry {entry}: no timestamp attribute")]
    MissingTimestamp { entry: String },

    #[error("entry {entry}: timestamp {raw:?} is not a valid epoch")]
    InvalidTimestamp { entry: String, raw: String },

    #[error("entry {entry}: no body container")]
    MissingBody { entry: String },

    #[error("entry {entry}: no title heading")]
    MissingTitle { entry: String },

    #[error("entry {entry}: title has no permalink")]
    MissingLink { entry: String },
}

impl MalformedEntryError {
    /// Id attribute of the offending entry.
    pub fn entry_id(&self) -> &str {
        match self {
            Self::MissingTimestamp { entry }
            | Self::InvalidTimestamp { entry, .. }
            | Self::MissingBody { entry }
            | Self::MissingTitle { entry }
            | Self::MissingLink { entry } => entry,
        }
    }
}

/// Why a URL candidate did not produce a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub url: String,
    pub reason: String,
}

impl fmt::Display for FailedAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url, self.reason)
    }
}

/// Terminal failure of a whole request.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("no content available for {date} ({} attempt(s) failed)", .attempts.len())]
    NoLiveblogFound {
        date: NaiveDate,
        attempts: Vec<FailedAttempt>,
    },
}

/// Failure to load a YAML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_is_exposed_for_every_variant() {
        let errors = [
            MalformedEntryError::MissingTimestamp { entry: "liveblog-entry-1".into() },
            MalformedEntryError::InvalidTimestamp {
                entry: "liveblog-entry-1".into(),
                raw: "soon".into(),
            },
            MalformedEntryError::MissingBody { entry: "liveblog-entry-1".into() },
            MalformedEntryError::MissingTitle { entry: "liveblog-entry-1".into() },
            MalformedEntryError::MissingLink { entry: "liveblog-entry-1".into() },
        ];
        for e in &errors {
            assert_eq!(e.entry_id(), "liveblog-entry-1");
        }
    }

    #[test]
    fn test_no_liveblog_message_names_the_date() {
        let err = ScrapeError::NoLiveblogFound {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            attempts: vec![FailedAttempt {
                url: "https://example.com/liveblog-march-5-2024".into(),
                reason: "HTTP 404".into(),
            }],
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-03-05"));
        assert!(msg.contains("1 attempt(s)"));
    }
}
