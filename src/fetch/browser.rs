//! Browser-driven rendering that reveals older live-blog entries.
//!
//! The live blog initially renders only its newest entries; the rest sit
//! behind a "load more" control. This renderer launches Chrome/Chromium via
//! `chromiumoxide`, opens the page, waits (bounded) for the control, clicks
//! it, lets the new entries settle and captures the resulting document.
//!
//! One browser process is launched per render and closed on every exit path.
//! If the surrounding deadline drops the render future early, dropping the
//! `Browser` handle kills the child process.

use super::PageRenderer;
use crate::config::{BrowserSettings, ScraperConfig};
use crate::error::FetchError;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Renders pages in a real browser session.
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    settings: BrowserSettings,
    user_agent: String,
}

impl ChromeRenderer {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            settings: config.browser.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    async fn launch(&self) -> Result<(Browser, JoinHandle<()>), FetchError> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if !self.settings.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| FetchError::Browser(format!("invalid browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            FetchError::Browser(format!(
                "failed to launch browser: {e}. Is Chrome or Chromium installed and in PATH?"
            ))
        })?;

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok((browser, events))
    }

    async fn reveal_entries(&self, browser: &Browser, url: &str) -> Result<String, FetchError> {
        let page = browser.new_page("about:blank").await.map_err(cdp)?;
        page.set_user_agent(&self.user_agent).await.map_err(cdp)?;
        page.goto(url).await.map_err(cdp)?;
        page.wait_for_navigation().await.map_err(cdp)?;

        let control = self.wait_for_control(&page).await?;
        control.scroll_into_view().await.map_err(cdp)?;
        control.click().await.map_err(cdp)?;
        debug!("Clicked load-more control");

        tokio::time::sleep(self.settings.settle()).await;
        let html = page.content().await.map_err(cdp)?;

        if let Err(e) = page.close().await {
            debug!(error = %e, "Failed to close page");
        }
        Ok(html)
    }

    async fn wait_for_control(&self, page: &Page) -> Result<Element, FetchError> {
        let started = Instant::now();
        let selector = self.settings.load_more_selector.as_str();
        loop {
            match page.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(e) if started.elapsed() >= self.settings.wait() => {
                    return Err(FetchError::Browser(format!(
                        "load-more control {selector:?} not found within {}s: {e}",
                        self.settings.wait_secs
                    )));
                }
                Err(_) => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }
    }
}

fn cdp(e: chromiumoxide::error::CdpError) -> FetchError {
    FetchError::Browser(e.to_string())
}

impl PageRenderer for ChromeRenderer {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn render(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let (mut browser, events) = self.launch().await?;

        let result = self.reveal_entries(&browser, url).await;

        if let Err(e) = browser.close().await {
            warn!(error = %e, "Failed to close browser");
        }
        if let Err(e) = browser.wait().await {
            debug!(error = %e, "Failed to reap browser process");
        }
        events.abort();

        match &result {
            Ok(html) => info!(
                bytes = html.len(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Rendered page"
            ),
            Err(e) => warn!(error = %e, "Browser rendering failed"),
        }
        result
    }
}
