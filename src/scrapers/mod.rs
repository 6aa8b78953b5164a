//! Live-blog page parsing.
//!
//! Turning a fetched page into display-ready entries happens in two phases:
//!
//! 1. **Extraction**: locate the live-blog container and its entry elements
//! 2. **Normalization**: decompose each entry into title, timestamp, byline,
//!    media, captioned figures and a markdown body
//!
//! # Submodules
//!
//! | Module | Role |
//! |--------|------|
//! | [`extract`] | container and entry lookup, page headline |
//! | [`normalize`] | per-entry field extraction |
//! | [`matchers`] | ordered selector rules for each field |
//! | [`body`] | markdown rendering of what remains |
//!
//! Parsing is synchronous and the parsed tree is not `Send`; callers finish
//! all tree work before their next `.await`.

pub mod body;
pub mod extract;
pub mod matchers;
pub mod normalize;

pub use extract::{LiveblogDocument, RawEntryNode};
pub use normalize::normalize;
