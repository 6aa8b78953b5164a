//! Markdown rendering of a scraped day.
//!
//! Each entry becomes a `<details>` block so renderers that support HTML in
//! markdown show it collapsed, labelled with its Eastern time and title:
//!
//! ```text
//! <details>
//! <summary><b>05:13:20 PM</b> Rockets fired at the south</summary>
//!
//! *By Jane Reporter*
//!
//! ![Sirens in Ashkelon](https://…/lead.jpg)
//! *Sirens in Ashkelon*
//!
//! Body…
//!
//! [Link to Original Post](https://…)
//!
//! </details>
//! ```
//!
//! Inside `<details>` most renderers treat raw tags as HTML, so angle brackets
//! and ampersands in the byline and body are written as entities.

use crate::models::{CaptionedImage, NormalizedEntry, ScrapeResult};
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Times of Israel Live Blog";

/// Render the whole result as one markdown document.
pub fn result_to_markdown(result: &ScrapeResult, requested: chrono::NaiveDate) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# {}: {}\n", PAGE_TITLE, result.resolved_date.format("%B %d %Y"));
    if result.resolved_date != requested {
        let _ = writeln!(
            md,
            "> No live blog was found for {requested}; showing {} instead.\n",
            result.resolved_date
        );
    }
    if let Some(meta) = &result.metadata {
        let _ = writeln!(md, "## {}\n", meta.headline);
        if let Some(sub) = &meta.subheadline {
            let _ = writeln!(md, "{sub}\n");
        }
    }

    for entry in &result.entries {
        md.push_str(&entry_to_markdown(entry));
        md.push('\n');
    }

    if result.skipped > 0 {
        let _ = writeln!(
            md,
            "_{} entr{} could not be displayed._",
            result.skipped,
            if result.skipped == 1 { "y" } else { "ies" }
        );
    }
    let _ = writeln!(md, "\nSource: <{}>", result.resolved_url);
    md
}

/// Render a single entry as a collapsible section.
pub fn entry_to_markdown(entry: &NormalizedEntry) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "<details>");
    let _ = writeln!(
        md,
        "<summary><b>{}</b> {}</summary>\n",
        entry.timestamp_local,
        escape_html(&entry.title)
    );

    if let Some(byline) = &entry.byline {
        let _ = writeln!(md, "*{}*\n", escape_html(byline.trim()));
    }
    if let Some(media) = &entry.media {
        write_image(&mut md, media);
    }
    for image in &entry.captioned_images {
        write_image(&mut md, image);
    }
    if !entry.body_markdown.is_empty() {
        let _ = writeln!(md, "{}\n", escape_html(&entry.body_markdown));
    }
    let _ = writeln!(md, "[Link to Original Post]({})\n", entry.source_link);
    let _ = writeln!(md, "</details>");
    md
}

fn write_image(md: &mut String, image: &CaptionedImage) {
    let _ = writeln!(md, "![{}]({})", image.caption.replace(['[', ']'], ""), image.image_url);
    if !image.caption.is_empty() {
        let _ = writeln!(md, "*{}*", image.caption);
    }
    md.push('\n');
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageMetadata, SkippedEntry};
    use chrono::{DateTime, NaiveDate};

    fn entry() -> NormalizedEntry {
        NormalizedEntry {
            entry_id: "liveblog-entry-7".to_string(),
            timestamp_utc: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            timestamp_local: "05:13:20 PM".to_string(),
            title: "Rockets & sirens".to_string(),
            source_link: "https://example.com/e/7".to_string(),
            byline: Some("By Jane Reporter".to_string()),
            media: Some(CaptionedImage {
                image_url: "https://example.com/lead.jpg".to_string(),
                caption: "Lead [photo]".to_string(),
            }),
            captioned_images: vec![CaptionedImage {
                image_url: "https://example.com/fig.jpg".to_string(),
                caption: "Figure".to_string(),
            }],
            body_markdown: "Sirens sounded.".to_string(),
        }
    }

    #[test]
    fn test_entry_section_layout() {
        let md = entry_to_markdown(&entry());
        assert!(md.starts_with(
            "<details>\n<summary><b>05:13:20 PM</b> Rockets &amp; sirens</summary>"
        ));
        assert!(md.contains("*By Jane Reporter*"));
        assert!(md.contains("![Lead photo](https://example.com/lead.jpg)\n*Lead [photo]*"));
        assert!(md.contains("![Figure](https://example.com/fig.jpg)"));
        assert!(md.contains("Sirens sounded."));
        assert!(md.contains("[Link to Original Post](https://example.com/e/7)"));
        assert!(md.trim_end().ends_with("</details>"));
    }

    #[test]
    fn test_literal_tags_in_body_are_escaped() {
        let mut e = entry();
        e.body_markdown = "A <b> & c".to_string();
        e.byline = Some("By <i>Staff</i>".to_string());

        let md = entry_to_markdown(&e);
        assert!(md.contains("A &lt;b&gt; &amp; c"));
        assert!(md.contains("*By &lt;i&gt;Staff&lt;/i&gt;*"));
        assert!(!md.contains("A <b>"));
    }

    #[test]
    fn test_document_notes_rollback_and_skips() {
        let result = ScrapeResult {
            metadata: Some(PageMetadata {
                headline: "Day 39 of the war".to_string(),
                subheadline: Some("Updates".to_string()),
            }),
            entries: vec![entry()],
            resolved_url: "https://example.com/liveblog-november-14-2023".to_string(),
            resolved_date: NaiveDate::from_ymd_opt(2023, 11, 14).unwrap(),
            skipped: 1,
            warnings: vec![SkippedEntry {
                entry_id: "liveblog-entry-2".to_string(),
                reason: "no title heading".to_string(),
            }],
        };

        let md = result_to_markdown(&result, NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
        assert!(md.starts_with("# Times of Israel Live Blog: November 14 2023"));
        assert!(md.contains("No live blog was found for 2023-11-15"));
        assert!(md.contains("## Day 39 of the war"));
        assert!(md.contains("_1 entry could not be displayed._"));
        assert!(md.contains("Source: <https://example.com/liveblog-november-14-2023>"));
    }
}
