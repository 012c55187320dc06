//! Cache repository for generated notes and bookmarks.
//!
//! Every operation degrades instead of failing: unreadable or corrupt state
//! reads as empty, and rejected writes are logged and dropped. Nothing here
//! returns an error to the caller.
//!
//! Updates are read-modify-write over a whole JSON value, so they run under a
//! write lock shared by every clone of the repository.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;

use crate::db::KeyValueStore;
use crate::models::CachedNote;

/// Key holding the JSON object of chapter id to [`CachedNote`].
pub const NOTES_CACHE_KEY: &str = "shortnotes_notes_cache";
/// Key holding the JSON array of bookmarked chapter ids.
pub const BOOKMARKS_KEY: &str = "shortnotes_bookmarks";

type NoteMap = BTreeMap<String, CachedNote>;

/// Why persisted state could not be used. Both causes are logged when
/// detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadError {
    /// The store itself failed; existing data may still be intact.
    Unavailable,
    /// The stored value does not parse.
    Corrupt,
}

#[derive(Clone)]
pub struct CacheRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl CacheRepository {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ============================================================
    // Notes
    // ============================================================

    pub fn get_note(&self, chapter_id: &str) -> Option<CachedNote> {
        self.read_notes().ok()?.remove(chapter_id)
    }

    /// Every cached note, keyed by chapter id.
    pub fn cached_notes(&self) -> BTreeMap<String, CachedNote> {
        self.read_notes().unwrap_or_default()
    }

    /// Store `content` for `chapter_id`, replacing any previous entry and
    /// leaving other chapters untouched.
    ///
    /// A corrupt mapping is replaced. If the store cannot be read at all the
    /// write is skipped, since writing would drop the unread entries.
    pub fn put_note(&self, chapter_id: &str, content: &str) {
        let _guard = self.write_guard();
        let mut notes = match self.read_notes() {
            Ok(notes) => notes,
            Err(ReadError::Corrupt) => NoteMap::default(),
            Err(ReadError::Unavailable) => {
                tracing::error!(chapter_id, "Skipping note cache write after failed read");
                return;
            }
        };
        notes.insert(chapter_id.to_string(), CachedNote::new(chapter_id, content));

        if let Err(e) = self.write_json(NOTES_CACHE_KEY, &notes) {
            tracing::error!(chapter_id, "Failed to write note cache: {:#}", e);
        }
    }

    /// Drop the cached note for one chapter. Returns whether one was removed.
    pub fn remove_note(&self, chapter_id: &str) -> bool {
        let _guard = self.write_guard();
        let Ok(mut notes) = self.read_notes() else {
            return false;
        };
        if notes.remove(chapter_id).is_none() {
            return false;
        }

        match self.write_json(NOTES_CACHE_KEY, &notes) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(chapter_id, "Failed to write note cache: {:#}", e);
                false
            }
        }
    }

    pub fn clear_notes(&self) {
        let _guard = self.write_guard();
        if let Err(e) = self.store.delete(NOTES_CACHE_KEY) {
            tracing::error!("Failed to clear note cache: {:#}", e);
        }
    }

    fn read_notes(&self) -> Result<NoteMap, ReadError> {
        self.read_json(NOTES_CACHE_KEY)
    }

    // ============================================================
    // Bookmarks
    // ============================================================

    /// Bookmarked chapter ids in the order they were added.
    pub fn get_bookmarks(&self) -> Vec<String> {
        self.read_bookmarks().unwrap_or_default()
    }

    pub fn is_bookmarked(&self, chapter_id: &str) -> bool {
        self.get_bookmarks().iter().any(|id| id == chapter_id)
    }

    /// Add `chapter_id` if absent, remove it if present.
    ///
    /// Returns the new membership state. Any persistence failure reports
    /// `false`.
    pub fn toggle_bookmark(&self, chapter_id: &str) -> bool {
        let _guard = self.write_guard();
        let Ok(mut bookmarks) = self.read_bookmarks() else {
            return false;
        };

        let was_bookmarked = bookmarks.iter().any(|id| id == chapter_id);
        if was_bookmarked {
            bookmarks.retain(|id| id != chapter_id);
        } else {
            bookmarks.push(chapter_id.to_string());
        }

        match self.write_json(BOOKMARKS_KEY, &bookmarks) {
            Ok(()) => {
                tracing::debug!(chapter_id, bookmarked = !was_bookmarked, "Toggled bookmark");
                !was_bookmarked
            }
            Err(e) => {
                tracing::error!(chapter_id, "Failed to write bookmarks: {:#}", e);
                false
            }
        }
    }

    fn read_bookmarks(&self) -> Result<Vec<String>, ReadError> {
        let raw: Vec<String> = self.read_json(BOOKMARKS_KEY)?;
        let mut bookmarks = Vec::with_capacity(raw.len());
        for id in raw {
            if !bookmarks.contains(&id) {
                bookmarks.push(id);
            }
        }
        Ok(bookmarks)
    }

    // ============================================================
    // Serialization helpers
    // ============================================================

    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, ReadError> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(T::default()),
            Err(e) => {
                tracing::warn!(key, "Failed to read persisted state: {:#}", e);
                return Err(ReadError::Unavailable);
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            tracing::warn!(key, "Ignoring corrupt persisted state: {}", e);
            ReadError::Corrupt
        })
    }

    fn write_json<T: serde::Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}
