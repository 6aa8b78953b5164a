//! Page retrieval strategies.
//!
//! # Architecture
//!
//! - [`PageFetcher`]: anything that turns a URL into a [`RawPage`]
//! - [`HttpFetcher`]: plain GET with a custom client identity and a timeout
//! - [`PageRenderer`]: a richer source of HTML for a URL (a real browser)
//! - [`LiveblogFetcher`]: decorator combining the two
//!
//! `LiveblogFetcher` always performs the plain fetch first. That result is the
//! safety net: if the renderer is absent, fails, overruns its deadline or
//! lands on a page without the live-blog container (a consent wall, say),
//! the plain HTML is returned instead. Only a rendered document that still
//! carries the live blog replaces it.

#[cfg(feature = "browser")]
pub mod browser;
pub mod http;

#[cfg(feature = "browser")]
pub use browser::ChromeRenderer;
pub use http::HttpFetcher;

use crate::error::FetchError;
use crate::models::RawPage;
use crate::scrapers::extract::has_liveblog_container;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{info, instrument, warn};

/// Turns a URL into raw HTML.
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, FetchError>;
}

/// Produces the fully rendered document for a URL.
pub trait PageRenderer {
    async fn render(&self, url: &str) -> Result<String, FetchError>;
}

/// Placeholder renderer for fetchers built without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRenderer;

impl PageRenderer for NoRenderer {
    async fn render(&self, _url: &str) -> Result<String, FetchError> {
        Err(FetchError::RendererUnavailable)
    }
}

/// Plain fetch first, optional rendering on top.
pub struct LiveblogFetcher<P, R = NoRenderer> {
    primary: P,
    renderer: Option<R>,
    /// Upper bound on one rendering.
    deadline: Duration,
}

impl<P> LiveblogFetcher<P, NoRenderer> {
    pub fn plain(primary: P) -> Self {
        Self {
            primary,
            renderer: None,
            deadline: Duration::ZERO,
        }
    }
}

impl<P, R> LiveblogFetcher<P, R> {
    pub fn with_renderer(primary: P, renderer: R, deadline: Duration) -> Self {
        Self {
            primary,
            renderer: Some(renderer),
            deadline,
        }
    }
}

impl<P, R> fmt::Debug for LiveblogFetcher<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveblogFetcher")
            .field("renderer", &self.renderer.is_some())
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl<P, R> PageFetcher for LiveblogFetcher<P, R>
where
    P: PageFetcher,
    R: PageRenderer,
{
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<RawPage, FetchError> {
        let page = self.primary.fetch(url).await?;

        let Some(renderer) = &self.renderer else {
            return Ok(page);
        };

        let t0 = Instant::now();
        match timeout(self.deadline, renderer.render(url)).await {
            Ok(Ok(html)) if has_liveblog_container(&html) => {
                info!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    plain_bytes = page.html.len(),
                    rendered_bytes = html.len(),
                    "Using rendered document"
                );
                Ok(RawPage {
                    html,
                    source_url: page.source_url,
                })
            }
            Ok(Ok(html)) => {
                warn!(
                    rendered_bytes = html.len(),
                    "Rendered document has no live-blog container; using plain fetch"
                );
                Ok(page)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Rendering failed; using plain fetch");
                Ok(page)
            }
            Err(_) => {
                let e = FetchError::Deadline {
                    url: url.to_string(),
                    secs: self.deadline.as_secs(),
                };
                warn!(error = %e, "Rendering timed out; using plain fetch");
                Ok(page)
            }
        }
    }
}
