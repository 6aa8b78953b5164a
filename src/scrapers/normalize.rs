//! Per-entry decomposition into a [`NormalizedEntry`].
//!
//! Fields are read in a fixed order and every element that feeds a field is
//! claimed as it is read:
//!
//! 1. timestamp (`data-timestamp`, epoch seconds)
//! 2. title and permalink from the heading, heading claimed
//! 3. social-sharing widget claimed
//! 4. byline, converted to markdown
//! 5. lead media image and caption
//! 6. captioned figures, all read before any is claimed
//! 7. whatever is left of the body, converted to markdown
//!
//! Claiming never mutates the parsed tree; later steps simply cannot see a
//! claimed subtree, and the body is rendered without any of them.

use super::body::{html_to_markdown, remaining_markdown};
use super::extract::RawEntryNode;
use super::matchers::{
    BODY, BYLINE, Exclusions, FIGURE, FIGURE_CAPTION, FIGURE_IMAGE, MEDIA, MEDIA_IMAGE, SOCIAL,
    TIMESTAMP, TITLE_HEADING, TITLE_LINK,
};
use crate::error::MalformedEntryError;
use crate::models::{CaptionedImage, NormalizedEntry};
use crate::utils::{absolutize, squash_whitespace};
use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use scraper::ElementRef;
use tracing::{debug, instrument};

/// Display format of `timestamp_local`: 12-hour clock with seconds.
pub const LOCAL_TIME_FORMAT: &str = "%I:%M:%S %p";

/// Render an instant as US Eastern wall-clock time.
pub fn eastern_clock(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&New_York)
        .format(LOCAL_TIME_FORMAT)
        .to_string()
}

/// Normalize one entry.
///
/// # Errors
///
/// A [`MalformedEntryError`] when the timestamp, body container, title or
/// permalink is missing. Every other sub-element is optional.
#[instrument(level = "debug", skip_all, fields(entry = node.id))]
pub fn normalize(node: RawEntryNode<'_>) -> Result<NormalizedEntry, MalformedEntryError> {
    let entry = node.element;
    let entry_id = node.id.to_string();
    let resolve = |href: &str| match node.base {
        Some(base) => absolutize(base, href),
        None => href.trim().to_string(),
    };
    let mut claimed = Exclusions::new();

    let timestamp_utc = read_timestamp(entry, &entry_id)?;

    let body = BODY
        .first(entry, &claimed)
        .ok_or_else(|| MalformedEntryError::MissingBody {
            entry: entry_id.clone(),
        })?;

    let heading = TITLE_HEADING
        .first(body, &claimed)
        .ok_or_else(|| MalformedEntryError::MissingTitle {
            entry: entry_id.clone(),
        })?;
    let link = TITLE_LINK
        .first(heading, &claimed)
        .ok_or_else(|| MalformedEntryError::MissingTitle {
            entry: entry_id.clone(),
        })?;
    let title = squash_whitespace(link.text());
    if title.is_empty() {
        return Err(MalformedEntryError::MissingTitle { entry: entry_id });
    }
    let source_link = link
        .value()
        .attr("href")
        .filter(|h| !h.trim().is_empty())
        .map(resolve)
        .ok_or_else(|| MalformedEntryError::MissingLink {
            entry: entry_id.clone(),
        })?;
    claimed.claim(heading);

    match SOCIAL.first(body, &claimed) {
        Some(social) => claimed.claim(social),
        None => debug!(field = SOCIAL.field, "No match; continuing"),
    }

    let mut byline = None;
    if let Some(el) = BYLINE.first(body, &claimed) {
        let md = html_to_markdown(&el.html(), node.base);
        byline = Some(md).filter(|b| !b.is_empty());
        claimed.claim(el);
    }

    let mut media = None;
    if let Some(el) = MEDIA
        .first(body, &claimed)
        .or_else(|| MEDIA.first(entry, &claimed))
    {
        media = read_media(el, &resolve);
        claimed.claim(el);
    }

    let figures = FIGURE.all(body, &claimed);
    let captioned_images: Vec<CaptionedImage> = figures
        .iter()
        .filter_map(|fig| read_figure(*fig, &resolve))
        .collect();
    for fig in figures {
        claimed.claim(fig);
    }

    let body_markdown = remaining_markdown(body, &claimed, node.base);

    debug!(
        claimed = claimed.len(),
        has_byline = byline.is_some(),
        has_media = media.is_some(),
        figures = captioned_images.len(),
        "Normalized entry"
    );

    Ok(NormalizedEntry {
        entry_id,
        timestamp_local: eastern_clock(timestamp_utc),
        timestamp_utc,
        title,
        source_link,
        byline,
        media,
        captioned_images,
        body_markdown,
    })
}

fn read_timestamp(
    entry: ElementRef<'_>,
    entry_id: &str,
) -> Result<DateTime<Utc>, MalformedEntryError> {
    let raw = TIMESTAMP
        .first(entry, &Exclusions::new())
        .and_then(|el| el.value().attr("data-timestamp"))
        .ok_or_else(|| MalformedEntryError::MissingTimestamp {
            entry: entry_id.to_string(),
        })?;

    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| MalformedEntryError::InvalidTimestamp {
            entry: entry_id.to_string(),
            raw: raw.to_string(),
        })
}

fn read_media(el: ElementRef<'_>, resolve: &impl Fn(&str) -> String) -> Option<CaptionedImage> {
    let img = MEDIA_IMAGE.first(el, &Exclusions::new())?;
    let src = img.value().attr("src").filter(|s| !s.trim().is_empty())?;
    let caption = ["title", "alt"]
        .iter()
        .filter_map(|attr| img.value().attr(attr))
        .map(|c| squash_whitespace([c]))
        .find(|c| !c.is_empty())
        .unwrap_or_default();

    Some(CaptionedImage {
        image_url: resolve(src),
        caption,
    })
}

/// The target of the link wrapping the figure's image wins over the image's
/// own source. Links elsewhere in the figure (caption credits) are ignored.
fn read_figure(fig: ElementRef<'_>, resolve: &impl Fn(&str) -> String) -> Option<CaptionedImage> {
    let none = Exclusions::new();
    let target = FIGURE_IMAGE.first(fig, &none).and_then(|img| {
        let wrapper = img
            .ancestors()
            .filter_map(ElementRef::wrap)
            .take_while(|el| *el != fig)
            .find(|el| el.value().name() == "a")
            .and_then(|a| a.value().attr("href"))
            .filter(|href| !href.trim().is_empty());
        wrapper
            .or_else(|| img.value().attr("src"))
            .filter(|u| !u.trim().is_empty())
    });

    let Some(target) = target else {
        debug!(figure = fig.value().id().unwrap_or_default(), "Figure without image; dropping");
        return None;
    };

    let caption = FIGURE_CAPTION
        .first(fig, &none)
        .map(|c| squash_whitespace(c.text()))
        .unwrap_or_default();

    Some(CaptionedImage {
        image_url: resolve(target),
        caption,
    })
}
