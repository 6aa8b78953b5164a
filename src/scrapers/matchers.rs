//! Ordered matcher rules for live-blog sub-elements.
//!
//! The markup has shifted over time (social widgets renamed, figures moving
//! from `div` to `figure`), so each field owns a short list of rules. Rules
//! are tried in order and the first one that matches anything wins.
//!
//! Matching honours [`Exclusions`]: an element inside a subtree that an
//! earlier step already claimed is invisible to later steps, which gives the
//! same result as detaching claimed elements without mutating the tree.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

/// One way of recognising an element.
#[derive(Debug)]
pub enum Rule {
    /// Descendants matching a CSS selector.
    Css(Selector),
    /// Descendants with tag `tag`, an id starting with `id_prefix` and at
    /// least one class starting with `class_prefix`.
    Prefixed {
        tag: &'static str,
        class_prefix: &'static str,
        id_prefix: &'static str,
    },
}

impl Rule {
    fn css(selector: &str) -> Self {
        Rule::Css(Selector::parse(selector).expect("static selector"))
    }

    fn select<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        match self {
            Rule::Css(selector) => scope.select(selector).collect(),
            Rule::Prefixed {
                tag,
                class_prefix,
                id_prefix,
            } => scope
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .filter(|el| {
                    let value = el.value();
                    value.name() == *tag
                        && value.id().is_some_and(|id| id.starts_with(id_prefix))
                        && value.classes().any(|c| c.starts_with(class_prefix))
                })
                .collect(),
        }
    }
}

/// Subtrees already claimed by an earlier extraction step.
#[derive(Debug, Default, Clone)]
pub struct Exclusions<'a> {
    claimed: Vec<ElementRef<'a>>,
}

impl<'a> Exclusions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, el: ElementRef<'a>) {
        if !self.is_claimed(el) {
            self.claimed.push(el);
        }
    }

    /// `el` itself was claimed.
    pub fn is_claimed(&self, el: ElementRef<'a>) -> bool {
        self.claimed.contains(&el)
    }

    /// `el` or one of its ancestors was claimed.
    pub fn covers(&self, el: ElementRef<'a>) -> bool {
        self.is_claimed(el)
            || el
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| self.is_claimed(a))
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementRef<'a>> + '_ {
        self.claimed.iter().copied()
    }
}

/// Named list of rules for one field.
#[derive(Debug)]
pub struct Matcher {
    pub field: &'static str,
    rules: Vec<Rule>,
}

impl Matcher {
    pub fn new(field: &'static str, rules: Vec<Rule>) -> Self {
        Self { field, rules }
    }

    /// First unclaimed element matched by the first productive rule.
    pub fn first<'a>(
        &self,
        scope: ElementRef<'a>,
        skip: &Exclusions<'a>,
    ) -> Option<ElementRef<'a>> {
        self.rules.iter().find_map(|rule| {
            rule.select(scope)
                .into_iter()
                .find(|el| !skip.covers(*el))
        })
    }

    /// Every unclaimed element matched by the first productive rule, in
    /// document order.
    pub fn all<'a>(&self, scope: ElementRef<'a>, skip: &Exclusions<'a>) -> Vec<ElementRef<'a>> {
        self.rules
            .iter()
            .map(|rule| {
                rule.select(scope)
                    .into_iter()
                    .filter(|el| !skip.covers(*el))
                    .collect::<Vec<_>>()
            })
            .find(|found| !found.is_empty())
            .unwrap_or_default()
    }
}

/// Element holding the epoch seconds of an entry.
pub static TIMESTAMP: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(
        "timestamp",
        vec![
            Rule::css("div.liveblog-date a span[data-timestamp]"),
            Rule::css(".liveblog-date [data-timestamp]"),
            Rule::css("[data-timestamp]"),
        ],
    )
});

/// Container of the entry's title, byline, media and text.
pub static BODY: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(
        "body",
        vec![
            Rule::css("div.liveblog-paragraph"),
            Rule::css(".liveblog-paragraph"),
        ],
    )
});

pub static TITLE_HEADING: Lazy<Matcher> =
    Lazy::new(|| Matcher::new("title", vec![Rule::css("h4"), Rule::css("h3")]));

pub static TITLE_LINK: Lazy<Matcher> =
    Lazy::new(|| Matcher::new("permalink", vec![Rule::css("a")]));

pub static SOCIAL: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(
        "social",
        vec![
            Rule::css("ul.social.liveblog-social"),
            Rule::css(".liveblog-social"),
            Rule::css("ul.social"),
            Rule::css(".social-share"),
        ],
    )
});

pub static BYLINE: Lazy<Matcher> =
    Lazy::new(|| Matcher::new("byline", vec![Rule::css("div.byline"), Rule::css(".byline")]));

pub static MEDIA: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(
        "media",
        vec![Rule::css("div.media"), Rule::css(".liveblog-media")],
    )
});

pub static MEDIA_IMAGE: Lazy<Matcher> =
    Lazy::new(|| Matcher::new("media image", vec![Rule::css("a img"), Rule::css("img")]));

pub static FIGURE: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(
        "captioned figure",
        vec![
            Rule::Prefixed {
                tag: "div",
                class_prefix: "wp-caption",
                id_prefix: "attachment",
            },
            Rule::Prefixed {
                tag: "figure",
                class_prefix: "wp-caption",
                id_prefix: "attachment",
            },
        ],
    )
});

pub static FIGURE_IMAGE: Lazy<Matcher> =
    Lazy::new(|| Matcher::new("figure image", vec![Rule::css("img[src]")]));

pub static FIGURE_CAPTION: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(
        "figure caption",
        vec![Rule::css(".wp-caption-text"), Rule::css("figcaption")],
    )
});

pub static HEADLINE: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(
        "headline",
        vec![
            Rule::css("h1.headline"),
            Rule::css(".liveblog-header h1"),
            Rule::css("h1"),
        ],
    )
});

pub static SUBHEADLINE: Lazy<Matcher> = Lazy::new(|| {
    Matcher::new(
        "subheadline",
        vec![
            Rule::css("h2.underline"),
            Rule::css(".subheadline"),
            Rule::css(".liveblog-header h2"),
        ],
    )
});
