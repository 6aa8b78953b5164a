//! Structural extraction of live-blog entries from a fetched page.
//!
//! # Markup contract
//!
//! ```text
//! div#liveblog-<digits>                 the single live-blog container
//! └── *#liveblog-entry-<digits>         one element per entry, document order
//! ```
//!
//! Entries are returned in the order the page lists them; nothing is
//! re-sorted.

use super::matchers::{Exclusions, HEADLINE, SUBHEADLINE};
use crate::error::StructureError;
use crate::models::{PageMetadata, RawPage};
use crate::utils::squash_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

static CONTAINER_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^liveblog-\d").unwrap());
static ENTRY_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^liveblog-entry-\d").unwrap());

static CONTAINER_CANDIDATES: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"div[id^="liveblog-"]"#).unwrap());
static ENTRY_CANDIDATES: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[id^="liveblog-entry-"]"#).unwrap());

/// A parsed page. Entry handles borrow from it.
pub struct LiveblogDocument {
    document: Html,
    source_url: String,
    base: Option<Url>,
}

/// Handle to one entry's subtree inside a [`LiveblogDocument`].
#[derive(Debug, Clone, Copy)]
pub struct RawEntryNode<'a> {
    pub id: &'a str,
    pub element: ElementRef<'a>,
    /// Page URL, for resolving relative links.
    pub base: Option<&'a Url>,
}

impl LiveblogDocument {
    pub fn parse(page: &RawPage) -> Self {
        Self {
            document: Html::parse_document(&page.html),
            source_url: page.source_url.clone(),
            base: Url::parse(&page.source_url).ok(),
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    fn container(&self) -> Option<ElementRef<'_>> {
        find_container(&self.document)
    }

    /// Every entry of the live-blog container, in document order.
    ///
    /// # Errors
    ///
    /// [`StructureError::MissingContainer`] when the page has no
    /// `div#liveblog-<digits>`.
    #[instrument(level = "debug", skip_all, fields(url = %self.source_url))]
    pub fn entries(&self) -> Result<Vec<RawEntryNode<'_>>, StructureError> {
        let container = self.container().ok_or_else(|| StructureError::MissingContainer {
            url: self.source_url.clone(),
        })?;

        let entries: Vec<RawEntryNode<'_>> = container
            .select(&ENTRY_CANDIDATES)
            .filter_map(|el| {
                let id = el.value().id()?;
                ENTRY_ID.is_match(id).then_some(RawEntryNode {
                    id,
                    element: el,
                    base: self.base.as_ref(),
                })
            })
            .collect();

        debug!(
            container = container.value().id().unwrap_or_default(),
            count = entries.len(),
            "Located live-blog entries"
        );
        Ok(entries)
    }

    /// Headline and subheadline, if the page carries them.
    pub fn metadata(&self) -> Option<PageMetadata> {
        let root = self.document.root_element();
        let none = Exclusions::new();
        let text_of = |el: ElementRef<'_>| squash_whitespace(el.text());

        let headline = HEADLINE
            .first(root, &none)
            .map(text_of)
            .filter(|t| !t.is_empty())?;
        let subheadline = SUBHEADLINE
            .first(root, &none)
            .map(text_of)
            .filter(|t| !t.is_empty());

        Some(PageMetadata {
            headline,
            subheadline,
        })
    }
}

fn find_container(document: &Html) -> Option<ElementRef<'_>> {
    document
        .select(&CONTAINER_CANDIDATES)
        .find(|el| el.value().id().is_some_and(|id| CONTAINER_ID.is_match(id)))
}

/// Whether `html` carries a `div#liveblog-<digits>` container.
pub fn has_liveblog_container(html: &str) -> bool {
    find_container(&Html::parse_document(html)).is_some()
}
