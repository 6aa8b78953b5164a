//! Markdown conversion for entry markup.
//!
//! The body of an entry is rendered from a copy of the parsed tree with every
//! subtree listed in [`Exclusions`] detached. The copy is serialized by
//! scraper and handed to `htmd`, which maps paragraphs, emphasis, links and
//! lists to their markdown forms. Script and style elements are detached too.
//!
//! Link and image targets in the markdown are resolved against the page URL.

use super::matchers::Exclusions;
use crate::utils::absolutize;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scraper::{ElementRef, Html};
use tracing::warn;
use url::Url;

const DROPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Target of an inline markdown link or image, `](target`.
static LINK_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\]\(([^)\s<>]+)").unwrap());

/// Markdown for the children of `root`, skipping excluded subtrees.
pub fn remaining_markdown<'a>(
    root: ElementRef<'a>,
    excluded: &Exclusions<'a>,
    base: Option<&Url>,
) -> String {
    let mut detached: Vec<_> = excluded.iter().map(|el| el.id()).collect();
    detached.extend(
        root.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| DROPPED_ELEMENTS.contains(&el.value().name()))
            .map(|el| el.id()),
    );

    let mut tree = root.tree().clone();
    for id in detached {
        if let Some(mut node) = tree.get_mut(id) {
            node.detach();
        }
    }

    let html = tree
        .get(root.id())
        .and_then(ElementRef::wrap)
        .map(|el| el.inner_html())
        .unwrap_or_default();
    html_to_markdown(&html, base)
}

/// Markdown for a standalone HTML snippet.
pub fn html_to_markdown(html: &str, base: Option<&Url>) -> String {
    let md = match htmd::convert(html) {
        Ok(md) => md.trim().to_string(),
        Err(e) => {
            warn!(error = %e, "Markdown conversion failed; falling back to plain text");
            let fragment = Html::parse_fragment(html);
            return crate::utils::squash_whitespace(fragment.root_element().text());
        }
    };
    match base {
        Some(base) => resolve_links(&md, base),
        None => md,
    }
}

fn resolve_links(markdown: &str, base: &Url) -> String {
    LINK_TARGET
        .replace_all(markdown, |caps: &Captures<'_>| {
            format!("]({}", absolutize(base, &caps[1]))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::matchers::{BYLINE, Exclusions};

    fn body(doc: &Html) -> ElementRef<'_> {
        let sel = scraper::Selector::parse("div.body").unwrap();
        doc.select(&sel).next().unwrap()
    }

    fn base() -> Url {
        Url::parse("https://www.timesofisrael.com/liveblog-march-5-2024").unwrap()
    }

    #[test]
    fn test_paragraphs_links_and_emphasis() {
        let doc = Html::parse_fragment(
            r#"<div class="body"><p>The <em>IDF</em> says <a href="https://example.com/x">more</a>.</p><p>Second</p></div>"#,
        );
        let md = remaining_markdown(body(&doc), &Exclusions::new(), None);
        assert!(md.contains("*IDF*") || md.contains("_IDF_"));
        assert!(md.contains("[more](https://example.com/x)"));
        assert!(md.contains("Second"));
        assert!(!md.contains("<p>"));
    }

    #[test]
    fn test_lists_become_markdown_lists() {
        let doc =
            Html::parse_fragment(r#"<div class="body"><ul><li>one</li><li>two</li></ul></div>"#);
        let md = remaining_markdown(body(&doc), &Exclusions::new(), None);
        assert!(md.lines().any(|l| {
            l.trim_start().starts_with(|c: char| c == '*' || c == '-') && l.contains("one")
        }));
        assert!(md.contains("two"));
    }

    #[test]
    fn test_excluded_subtree_is_omitted() {
        let doc = Html::parse_fragment(
            r#"<div class="body"><div class="byline">By Jane Reporter</div><p>Kept text</p></div>"#,
        );
        let root = body(&doc);
        let mut skip = Exclusions::new();
        skip.claim(BYLINE.first(root, &skip).unwrap());

        let md = remaining_markdown(root, &skip, None);
        assert_eq!(md, "Kept text");
    }

    #[test]
    fn test_nested_exclusion_keeps_surrounding_text() {
        let doc = Html::parse_fragment(
            r#"<div class="body"><p>Before <span class="byline">credit</span> after</p></div>"#,
        );
        let root = body(&doc);
        let mut skip = Exclusions::new();
        skip.claim(BYLINE.first(root, &skip).unwrap());

        let md = remaining_markdown(root, &skip, None);
        assert!(md.contains("Before"));
        assert!(md.contains("after"));
        assert!(!md.contains("credit"));
    }

    #[test]
    fn test_source_tree_is_untouched() {
        let doc = Html::parse_fragment(
            r#"<div class="body"><div class="byline">By Staff</div><p>Text</p></div>"#,
        );
        let root = body(&doc);
        let mut skip = Exclusions::new();
        skip.claim(BYLINE.first(root, &skip).unwrap());

        let _ = remaining_markdown(root, &skip, None);
        assert!(root.html().contains("By Staff"));
    }

    #[test]
    fn test_scripts_are_dropped_and_text_escaped() {
        let doc = Html::parse_fragment(
            r#"<div class="body"><script>var x = 1;</script><style>p { color: red }</style><p>Tom &amp; Jerry</p></div>"#,
        );
        let md = remaining_markdown(body(&doc), &Exclusions::new(), None);
        assert!(!md.contains("var x"));
        assert!(!md.contains("color"));
        assert!(md.contains("Jerry"));
    }

    #[test]
    fn test_relative_links_are_resolved() {
        let doc = Html::parse_fragment(
            r#"<div class="body"><p>Read <a href="/foo">more</a> or <a href="https://example.com/x">there</a>.</p></div>"#,
        );
        let md = remaining_markdown(body(&doc), &Exclusions::new(), Some(&base()));
        assert!(md.contains("[more](https://www.timesofisrael.com/foo)"));
        assert!(md.contains("[there](https://example.com/x)"));
    }

    #[test]
    fn test_html_to_markdown_snippet() {
        let md = html_to_markdown(
            r#"<div class="byline">By <a href="/writers/jane">Jane</a></div>"#,
            None,
        );
        assert!(md.contains("[Jane](/writers/jane)"));

        let md = html_to_markdown(
            r#"<div class="byline">By <a href="/writers/jane">Jane</a></div>"#,
            Some(&base()),
        );
        assert!(md.contains("[Jane](https://www.timesofisrael.com/writers/jane)"));
    }
}
