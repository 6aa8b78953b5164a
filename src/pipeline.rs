//! Request orchestration: candidates → fetch → extract → normalize.
//!
//! # State machine
//!
//! ```text
//! GenerateCandidates(date)
//!   └─ TryFetch(candidate)          candidates in generator order
//!        ├─ fetch error             next candidate; none left → rollback
//!        └─ fetched page
//!             ├─ no container       rollback (no further candidates for this date)
//!             └─ Extract → Normalize(each) → Done
//! Rollback(date - 1 day)            at most `rollback_days` times
//!   └─ GenerateCandidates
//! exhausted                          NoLiveblogFound
//! ```
//!
//! A malformed entry never aborts the page: it is logged, counted and left
//! out of the result.

use crate::error::{FailedAttempt, ScrapeError, StructureError};
use crate::fetch::PageFetcher;
use crate::models::{RawPage, ScrapeRequest, ScrapeResult, SkippedEntry};
use crate::scrapers::{LiveblogDocument, normalize};
use crate::urls::UrlCandidateGenerator;
use crate::utils::truncate_for_log;
use chrono::{Days, NaiveDate};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Drives one request through every stage.
#[derive(Debug)]
pub struct Pipeline<F> {
    fetcher: F,
    urls: UrlCandidateGenerator,
    rollback_days: u32,
}

impl<F: PageFetcher> Pipeline<F> {
    pub fn new(fetcher: F, urls: UrlCandidateGenerator, rollback_days: u32) -> Self {
        Self {
            fetcher,
            urls,
            rollback_days,
        }
    }

    /// Scrape the live blog for `request.target_date`, rolling back at most
    /// `rollback_days` days when no page exists.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::NoLiveblogFound`] once every candidate of every allowed
    /// date has failed.
    #[instrument(level = "info", skip_all, fields(date = %request.target_date))]
    pub async fn run(&self, request: ScrapeRequest) -> Result<ScrapeResult, ScrapeError> {
        let t0 = Instant::now();
        let mut attempts: Vec<FailedAttempt> = Vec::new();

        for step in 0..=self.rollback_days {
            let Some(date) = request.target_date.checked_sub_days(Days::new(step.into())) else {
                break;
            };
            if step > 0 {
                info!(%date, step, "Rolling back one day");
            }

            let mut tried: Vec<String> = Vec::new();
            for candidate in self.urls.generate(date) {
                if tried.contains(&candidate.url) {
                    debug!(url = %candidate.url, "Candidate already tried");
                    continue;
                }
                tried.push(candidate.url.clone());

                let page = match self.fetcher.fetch(&candidate.url).await {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(url = %candidate.url, error = %e, "Candidate failed");
                        attempts.push(FailedAttempt {
                            url: candidate.url,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                };

                match process_page(&page, date) {
                    Ok(result) => {
                        info!(
                            url = %result.resolved_url,
                            entries = result.entries.len(),
                            skipped = result.skipped,
                            elapsed_ms = t0.elapsed().as_millis() as u64,
                            "Scrape complete"
                        );
                        return Ok(result);
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            preview = %truncate_for_log(&page.html, 200),
                            "Fetched page has no live blog"
                        );
                        attempts.push(FailedAttempt {
                            url: candidate.url,
                            reason: e.to_string(),
                        });
                        break;
                    }
                }
            }
        }

        Err(ScrapeError::NoLiveblogFound {
            date: request.target_date,
            attempts,
        })
    }
}

/// Extract and normalize every entry of a fetched page.
///
/// Synchronous on purpose: the parsed tree must not live across an await.
pub fn process_page(page: &RawPage, date: NaiveDate) -> Result<ScrapeResult, StructureError> {
    let document = LiveblogDocument::parse(page);
    let nodes = document.entries()?;

    let mut entries = Vec::with_capacity(nodes.len());
    let mut warnings = Vec::new();
    for node in nodes {
        match normalize(node) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(entry = e.entry_id(), error = %e, "Skipping malformed entry");
                warnings.push(SkippedEntry {
                    entry_id: e.entry_id().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(ScrapeResult {
        metadata: document.metadata(),
        entries,
        resolved_url: document.source_url().to_string(),
        resolved_date: date,
        skipped: warnings.len(),
        warnings,
    })
}
