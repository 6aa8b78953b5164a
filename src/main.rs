//! # Liveblog Digest
//!
//! Fetches one day of the Times of Israel live blog and turns it into a clean,
//! chronologically ordered document: one section per entry with its Eastern
//! time, title, byline, images and body converted to markdown.
//!
//! ## Usage
//!
//! ```sh
//! liveblog_digest --date 2023-11-16
//! liveblog_digest --date 2023-11-16 --json --no-browser
//! ```
//!
//! ## Architecture
//!
//! 1. **Candidates**: build the URL variants the site uses for a date
//! 2. **Fetching**: plain HTTP first, then (optionally) a browser render that
//!    reveals entries hidden behind "load more"
//! 3. **Extraction**: locate the live-blog container and its entry nodes
//! 4. **Normalization**: each entry becomes a [`models::NormalizedEntry`];
//!    broken entries are skipped and counted
//! 5. **Output**: markdown or JSON on stdout
//!
//! If no page exists for the date, the previous day is tried (once by default).

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
#[cfg(test)]
mod test_fixtures;
mod urls;
mod utils;

use cli::{Cli, today_utc};
use config::{ScraperConfig, load_config};
use fetch::{HttpFetcher, LiveblogFetcher, PageFetcher};
use models::ScrapeRequest;
use outputs::{json, markdown};
use pipeline::Pipeline;
use urls::UrlCandidateGenerator;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // stdout carries the document, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("liveblog_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let target_date = match args.target_date(today_utc()) {
        Ok(date) => date,
        Err(msg) => {
            error!(%msg, "Rejected date");
            return Err(msg.into());
        }
    };

    let config = load_config(args.config.as_deref()).await?;
    debug!(?config, "Loaded configuration");

    let http = HttpFetcher::new(&config)?;
    let use_browser = config.browser.enabled && !args.no_browser;

    #[cfg(feature = "browser")]
    let output = if use_browser {
        let renderer = fetch::ChromeRenderer::new(&config);
        let fetcher = LiveblogFetcher::with_renderer(http, renderer, config.browser.deadline());
        run_with(fetcher, &config, &args, target_date).await
    } else {
        run_with(LiveblogFetcher::plain(http), &config, &args, target_date).await
    };

    #[cfg(not(feature = "browser"))]
    let output = {
        if use_browser {
            info!("Built without the `browser` feature; using plain HTTP only");
        }
        run_with(LiveblogFetcher::plain(http), &config, &args, target_date).await
    };

    let output = output?;
    println!("{output}");

    let elapsed = start_time.elapsed();
    info!(
        elapsed_secs = elapsed.as_secs_f64(),
        elapsed_human = %format!("{:.2}s", elapsed.as_secs_f64()),
        "Run complete"
    );

    Ok(())
}

/// Run the pipeline with the chosen fetcher and render the result.
async fn run_with<F: PageFetcher + std::fmt::Debug>(
    fetcher: F,
    config: &ScraperConfig,
    args: &Cli,
    target_date: chrono::NaiveDate,
) -> Result<String, Box<dyn Error>> {
    info!(?fetcher, "Fetch strategy");
    let pipeline = Pipeline::new(
        fetcher,
        UrlCandidateGenerator::from_config(config),
        config.rollback_days,
    );

    let result = match pipeline.run(ScrapeRequest::new(target_date)).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "No content available");
            return Err(e.into());
        }
    };

    if args.json {
        Ok(json::result_to_json(&result)?)
    } else {
        Ok(markdown::result_to_markdown(&result, target_date))
    }
}
