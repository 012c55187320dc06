use chrono::{DateTime, Utc};
use serde::Serialize;

use super::SubjectId;

/// A unit of curriculum content.
///
/// Chapters come from the static catalog; `id` is stable across releases and
/// is the key used by the note cache and the bookmark list.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Chapter {
    pub id: &'static str,
    pub title: &'static str,
    pub subject: SubjectId,
}

/// A chapter annotated with the user's state, used for detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterStatus {
    #[serde(flatten)]
    pub chapter: Chapter,
    pub bookmarked: bool,
    /// Whether a note is already cached for this chapter.
    pub cached: bool,
    /// When the cached note was written, if there is one.
    pub last_updated: Option<DateTime<Utc>>,
}
