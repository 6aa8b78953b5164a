//! Runtime configuration.
//!
//! Defaults describe the live blog this tool was written for. Any field can be
//! overridden from a YAML file passed with `--config`; missing fields keep
//! their defaults.
//!
//! ```yaml
//! user_agent: "XYZ/3.0"
//! rollback_days: 1
//! browser:
//!   enabled: false
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

/// Settings for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Scheme and host of the site, without a trailing slash.
    pub base_url: String,
    /// Path segment preceding the date slug.
    pub slug_prefix: String,
    /// Client identity sent with every request.
    pub user_agent: String,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
    /// How many earlier days to try when the requested day has no page.
    pub rollback_days: u32,
    pub browser: BrowserSettings,
}

/// Settings for the browser-automation fetch strategy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub enabled: bool,
    pub headless: bool,
    /// CSS selector of the control that reveals older entries.
    pub load_more_selector: String,
    /// Upper bound on waiting for the control to appear, in seconds.
    pub wait_secs: u64,
    /// Pause after clicking, in milliseconds.
    pub settle_millis: u64,
    /// Overall bound on one rendering, in seconds.
    pub deadline_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.timesofisrael.com".to_string(),
            slug_prefix: "liveblog-".to_string(),
            user_agent: "XYZ/3.0".to_string(),
            timeout_secs: 10,
            rollback_days: 1,
            browser: BrowserSettings::default(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            headless: true,
            load_more_selector: ".liveblog-load-more a, .liveblog-load-more button, button.load-more"
                .to_string(),
            wait_secs: 10,
            settle_millis: 1500,
            deadline_secs: 30,
        }
    }
}

impl ScraperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl BrowserSettings {
    pub fn wait(&self) -> Duration {
        Duration::from_secs(self.wait_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_millis)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

/// Load configuration from a YAML file, or defaults when `path` is `None`.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<ScraperConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(ScraperConfig::default());
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
    let config = parse_config(&raw).map_err(|source| ConfigError::Yaml {
        path: path.to_string(),
        source,
    })?;

    info!(path, "Loaded configuration");
    Ok(config)
}

fn parse_config(raw: &str) -> Result<ScraperConfig, serde_yaml::Error> {
    if raw.trim().is_empty() {
        return Ok(ScraperConfig::default());
    }
    serde_yaml::from_str(raw)
}
