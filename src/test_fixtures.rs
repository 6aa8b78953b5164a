//! HTML fixtures mirroring the live blog's markup.

use crate::models::RawPage;

pub const FIXTURE_URL: &str = "https://www.timesofisrael.com/liveblog-march-5-2024";

#[derive(Debug, Clone)]
pub struct FigureFixture {
    pub id: u32,
    pub link: Option<String>,
    pub image: Option<String>,
    pub caption: String,
}

#[derive(Debug, Clone)]
pub struct EntryFixture {
    pub id: u32,
    pub timestamp: Option<i64>,
    pub title: String,
    pub href: String,
    pub byline: Option<String>,
    pub media: Option<(String, String)>,
    pub figures: Vec<FigureFixture>,
    pub paragraphs: Vec<String>,
}

impl EntryFixture {
    pub fn new(id: u32, timestamp: i64, title: &str) -> Self {
        Self {
            id,
            timestamp: Some(timestamp),
            title: title.to_string(),
            href: format!("/liveblog_entry/entry-{id}/"),
            byline: None,
            media: None,
            figures: vec![],
            paragraphs: vec![format!("Body of entry {id}.")],
        }
    }

    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    pub fn byline(mut self, html: &str) -> Self {
        self.byline = Some(html.to_string());
        self
    }

    pub fn media(mut self, src: &str, title: &str) -> Self {
        self.media = Some((src.to_string(), title.to_string()));
        self
    }

    pub fn figure(mut self, link: Option<&str>, image: Option<&str>, caption: &str) -> Self {
        let id = 100 + self.figures.len() as u32;
        self.figures.push(FigureFixture {
            id,
            link: link.map(str::to_string),
            image: image.map(str::to_string),
            caption: caption.to_string(),
        });
        self
    }

    pub fn paragraphs(mut self, paragraphs: &[&str]) -> Self {
        self.paragraphs = paragraphs.iter().map(|p| p.to_string()).collect();
        self
    }
}

fn figure_html(figure: &FigureFixture) -> String {
    let img = figure
        .image
        .as_ref()
        .map(|src| format!(r#"<img src="{src}" width="640" height="400">"#))
        .unwrap_or_default();
    let inner = match &figure.link {
        Some(href) => format!(r#"<a href="{href}">{img}</a>"#),
        None => img,
    };
    format!(
        r#"<div id="attachment_{id}" style="width: 650px" class="wp-caption alignnone">{inner}<div class="wp-caption-text">{caption}</div></div>"#,
        id = figure.id,
        caption = figure.caption
    )
}

/// Markup of one `liveblog-entry-<id>` element.
pub fn entry_html(entry: &EntryFixture) -> String {
    let timestamp = entry
        .timestamp
        .map(|ts| format!(r#"<span class="liveblog-timestamp" data-timestamp="{ts}">time</span>"#))
        .unwrap_or_else(|| r#"<span class="liveblog-timestamp">time</span>"#.to_string());
    let byline = entry
        .byline
        .as_ref()
        .map(|b| format!(r#"<div class="byline">{b}</div>"#))
        .unwrap_or_default();
    let media = entry
        .media
        .as_ref()
        .map(|(src, title)| {
            format!(r#"<div class="media"><a href="{src}"><img src="{src}" title="{title}"></a></div>"#)
        })
        .unwrap_or_default();
    let figures: String = entry.figures.iter().map(figure_html).collect();
    let paragraphs: String = entry
        .paragraphs
        .iter()
        .map(|p| format!("<p>{p}</p>"))
        .collect();

    format!(
        r#"<div id="liveblog-entry-{id}" class="liveblog-entry">
  <div class="liveblog-date"><a href="{href}">{timestamp}</a></div>
  <div class="liveblog-paragraph">
    <h4><a href="{href}">{title}</a></h4>
    <ul class="social liveblog-social"><li><a href="https://twitter.com/share">Share</a></li></ul>
    {byline}
    {media}
    {paragraphs}
    {figures}
  </div>
</div>"#,
        id = entry.id,
        href = entry.href,
        title = entry.title,
    )
}

/// Full page with optional header and the given entries.
pub fn page_html(header: Option<(&str, Option<&str>)>, entries: &[EntryFixture]) -> String {
    let header = header
        .map(|(headline, sub)| {
            let sub = sub
                .map(|s| format!(r#"<h2 class="underline">{s}</h2>"#))
                .unwrap_or_default();
            format!(r#"<div class="liveblog-header"><h1 class="headline">{headline}</h1>{sub}</div>"#)
        })
        .unwrap_or_default();
    let body: String = entries.iter().map(entry_html).collect();
    format!(
        r#"<!DOCTYPE html><html><head><title>Live blog</title></head><body>{header}<div id="liveblog-1234567" class="liveblog">{body}</div></body></html>"#
    )
}

pub fn page(entries: &[EntryFixture]) -> RawPage {
    RawPage {
        html: page_html(None, entries),
        source_url: FIXTURE_URL.to_string(),
    }
}
