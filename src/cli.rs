//! Command-line interface definitions.
//!
//! The CLI is the date picker of this tool: it chooses which day to render,
//! enforces the valid date range and selects the output format.

use chrono::{NaiveDate, Utc};
use clap::Parser;

/// First day the live blog covers.
pub fn earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 7).unwrap_or(NaiveDate::MIN)
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Today's live blog as markdown
/// liveblog_digest
///
/// # A specific day as JSON, without launching a browser
/// liveblog_digest --date 2023-11-16 --json --no-browser
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Day to render (YYYY-MM-DD); defaults to today (UTC)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the result as JSON instead of markdown
    #[arg(long)]
    pub json: bool,

    /// Never launch a browser; only entries in the initial HTML are shown
    #[arg(long)]
    pub no_browser: bool,
}

impl Cli {
    /// The requested date, checked against [`earliest_date`] and `today`.
    pub fn target_date(&self, today: NaiveDate) -> Result<NaiveDate, String> {
        let date = self.date.unwrap_or(today);
        let earliest = earliest_date();
        if date < earliest || date > today {
            return Err(format!(
                "date {date} is outside the available range {earliest} to {today}"
            ));
        }
        Ok(date)
    }
}

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
