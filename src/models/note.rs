use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A generated note stored in the cache.
///
/// Entries are created on the first successful generation for a chapter and
/// overwritten wholesale on regeneration. They never expire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CachedNote {
    pub chapter_id: String,
    /// Markdown body.
    pub content: String,
    /// Milliseconds since the Unix epoch when the entry was written.
    pub last_updated: i64,
}

impl CachedNote {
    pub fn new(chapter_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            content: content.into(),
            last_updated: Utc::now().timestamp_millis(),
        }
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.last_updated).single()
    }
}

/// Why a fallback page was served instead of a generated note.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// No API key was configured for the generator.
    MissingCredential,
    /// The generator was called and failed.
    GenerationFailed,
}

/// Where the content of a [`ResolvedNote`] came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoteSource {
    Cache,
    Generated,
    Fallback { reason: FallbackKind },
}

impl NoteSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Markdown content for a chapter together with its origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedNote {
    pub chapter_id: String,
    pub content: String,
    pub source: NoteSource,
}
