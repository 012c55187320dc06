//! Note acquisition: cache first, generate on miss.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::cache::CacheRepository;
use crate::generation::{build_prompt, NoteGenerator};
use crate::models::{Chapter, FallbackKind, NoteSource, ResolvedNote};

type InFlight = Arc<tokio::sync::Mutex<()>>;

/// Resolves the Markdown note for a chapter.
///
/// # Flow
/// 1. Cache hit: return the stored content. No network, no write.
/// 2. Miss with no credential: return the missing-credential page.
/// 3. Miss: build the prompt, call the generator, cache the result.
/// 4. Generator failure: return the generic error page.
///
/// Fallback pages are never cached, so the next request retries generation.
/// Concurrent requests for the same chapter share one generator call: later
/// callers wait on a per-chapter lock and then find the note in the cache.
///
/// Cache misses run on a spawned task. A caller that goes away mid-request
/// (a dropped HTTP connection) does not cancel the generation or its cache
/// write.
#[derive(Clone)]
pub struct NoteService {
    cache: CacheRepository,
    generator: Arc<dyn NoteGenerator>,
    in_flight: Arc<Mutex<HashMap<String, InFlight>>>,
}

impl NoteService {
    pub fn new(cache: CacheRepository, generator: impl NoteGenerator + 'static) -> Self {
        Self::with_generator(cache, Arc::new(generator))
    }

    pub fn with_generator(cache: CacheRepository, generator: Arc<dyn NoteGenerator>) -> Self {
        Self {
            cache,
            generator,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn cache(&self) -> &CacheRepository {
        &self.cache
    }

    /// Markdown for `chapter`. Never fails; failures yield a fallback page.
    pub async fn get_note_content(&self, chapter: &Chapter) -> String {
        self.resolve_note(chapter).await.content
    }

    pub async fn resolve_note(&self, chapter: &Chapter) -> ResolvedNote {
        if let Some(note) = self.cache.get_note(chapter.id) {
            tracing::debug!(chapter_id = chapter.id, "Note cache hit");
            return cached(note.chapter_id, note.content);
        }

        let service = self.clone();
        let owned = chapter.clone();
        let task = tokio::spawn(async move {
            let slot = service.slot(owned.id);
            let resolved = {
                let _guard = slot.lock().await;
                // Another request may have filled the cache while we waited.
                match service.cache.get_note(owned.id) {
                    Some(note) => cached(note.chapter_id, note.content),
                    None => service.generate(&owned).await,
                }
            };
            service.release_slot(owned.id, slot);
            resolved
        });

        match task.await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::error!(chapter_id = chapter.id, "Note generation task failed: {}", e);
                fallback(chapter, FallbackKind::GenerationFailed)
            }
        }
    }

    /// Drop any cached note for `chapter` and generate a fresh one.
    pub async fn regenerate(&self, chapter: &Chapter) -> ResolvedNote {
        if self.cache.remove_note(chapter.id) {
            tracing::info!(chapter_id = chapter.id, "Cleared cached note for regeneration");
        }
        self.resolve_note(chapter).await
    }

    async fn generate(&self, chapter: &Chapter) -> ResolvedNote {
        if !self.generator.has_credential() {
            tracing::warn!(chapter_id = chapter.id, "No API key configured, serving fallback");
            return fallback(chapter, FallbackKind::MissingCredential);
        }

        tracing::info!(chapter_id = chapter.id, title = chapter.title, "Generating note");
        let prompt = build_prompt(chapter);

        match self.generator.generate(&prompt).await {
            Ok(content) => {
                self.cache.put_note(chapter.id, &content);
                ResolvedNote {
                    chapter_id: chapter.id.to_string(),
                    content,
                    source: NoteSource::Generated,
                }
            }
            Err(e) => {
                tracing::error!(chapter_id = chapter.id, "Note generation failed: {}", e);
                fallback(chapter, e.fallback_kind())
            }
        }
    }

    fn slot(&self, chapter_id: &str) -> InFlight {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        in_flight.entry(chapter_id.to_string()).or_default().clone()
    }

    fn release_slot(&self, chapter_id: &str, slot: InFlight) {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Map entry plus our handle: nobody else is waiting.
        if Arc::strong_count(&slot) <= 2 {
            in_flight.remove(chapter_id);
        }
    }
}

fn cached(chapter_id: String, content: String) -> ResolvedNote {
    ResolvedNote {
        chapter_id,
        content,
        source: NoteSource::Cache,
    }
}

fn fallback(chapter: &Chapter, reason: FallbackKind) -> ResolvedNote {
    ResolvedNote {
        chapter_id: chapter.id.to_string(),
        content: reason.page().to_string(),
        source: NoteSource::Fallback { reason },
    }
}
