//! Presentation of a [`ScrapeResult`](crate::models::ScrapeResult).
//!
//! # Submodules
//!
//! - [`json`]: the result as JSON, for other programs
//! - [`markdown`]: a readable document with one collapsible section per entry
//!
//! Both write to stdout; nothing is persisted.

pub mod json;
pub mod markdown;
