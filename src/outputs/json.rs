//! JSON output.
//!
//! Field names are camelCase:
//!
//! ```json
//! {
//!   "metadata": { "headline": "...", "subheadline": null },
//!   "entries": [ { "timestampLocal": "05:13:20 PM", "title": "...", ... } ],
//!   "resolvedUrl": "https://www.timesofisrael.com/liveblog-november-14-2023",
//!   "resolvedDate": "2023-11-14",
//!   "skipped": 0,
//!   "warnings": []
//! }
//! ```

use crate::models::ScrapeResult;
use tracing::{debug, instrument};

/// Serialize a result as pretty-printed JSON.
#[instrument(level = "debug", skip_all)]
pub fn result_to_json(result: &ScrapeResult) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(result)?;
    debug!(bytes = json.len(), "Serialized result");
    Ok(json)
}
