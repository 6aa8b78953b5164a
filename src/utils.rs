//! Small text and URL helpers shared across the pipeline.

use itertools::Itertools;
use url::Url;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a char boundary) with an
/// ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Join text fragments and collapse every run of whitespace to one space.
///
/// Fragments are concatenated as-is first, so text split by inline markup
/// (`Troops (<a>Flash90</a>)`) is not padded with extra spaces.
pub fn squash_whitespace<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .collect::<String>()
        .split_whitespace()
        .join(" ")
}

/// Resolve `href` against `base`, keeping `href` unchanged if it cannot be joined.
pub fn absolutize(base: &Url, href: &str) -> String {
    base.join(href.trim())
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let result = truncate_for_log("ééé", 3);
        assert!(result.starts_with('é'));
        assert!(result.contains("(+4 bytes)"));
    }

    #[test]
    fn test_squash_whitespace() {
        assert_eq!(
            squash_whitespace(["  IDF says\n", "  troops ", "", "advance\t "]),
            "IDF says troops advance"
        );
        assert_eq!(squash_whitespace(Vec::<&str>::new()), "");
    }

    #[test]
    fn test_squash_whitespace_keeps_inline_fragments_joined() {
        assert_eq!(squash_whitespace(["Troops (", "Flash90", ")"]), "Troops (Flash90)");
    }

    #[test]
    fn test_absolutize() {
        let base = Url::parse("https://www.timesofisrael.com/liveblog-march-5-2024").unwrap();
        assert_eq!(
            absolutize(&base, "/liveblog_entry/foo/"),
            "https://www.timesofisrael.com/liveblog_entry/foo/"
        );
        assert_eq!(
            absolutize(&base, "https://static.example.com/a.jpg"),
            "https://static.example.com/a.jpg"
        );
    }
}
