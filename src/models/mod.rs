//! Domain models for ShortNotes.
//!
//! # Core Concepts
//!
//! ## Static Catalog
//!
//! - [`Subject`]: Top-level grouping with display metadata ([`SubjectIcon`], color tag).
//! - [`Chapter`]: A unit of curriculum content, keyed by a stable string id.
//!
//! ## Persisted State
//!
//! - [`CachedNote`]: Generated Markdown for a chapter. Written once per successful
//!   generation, overwritten on regeneration, never evicted.
//! - Bookmarks: an ordered, duplicate-free list of chapter ids (plain `Vec<String>`).
//!
//! ## Acquisition Results
//!
//! - [`ResolvedNote`]: Content handed to callers, tagged with its [`NoteSource`] so a
//!   fallback page can be told apart from a real note.

mod chapter;
mod note;
mod subject;

pub use chapter::*;
pub use note::*;
pub use subject::*;
