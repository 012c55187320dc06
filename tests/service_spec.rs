use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use shortnotes::cache::CacheRepository;
use shortnotes::catalog;
use shortnotes::db::Database;
use shortnotes::generation::{GenerationError, NoteGenerator, NOTE_SECTIONS};
use shortnotes::models::*;
use shortnotes::service::NoteService;

/// Generator that echoes a five-section note for the prompt's chapter and
/// counts calls.
#[derive(Clone, Default)]
struct FakeGenerator {
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
    no_credential: bool,
    delay: Option<Duration>,
}

impl FakeGenerator {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl NoteGenerator for FakeGenerator {
    fn has_credential(&self) -> bool {
        !self.no_credential
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail.lock().unwrap() {
            return Err(GenerationError::Api("503 Service Unavailable".into()));
        }

        // Echo the title heading line the prompt asks for, then the sections.
        let heading = prompt
            .lines()
            .find(|l| l.starts_with("# "))
            .unwrap_or("# Untitled")
            .to_string();
        let mut note = heading;
        for section in NOTE_SECTIONS {
            note.push_str("\n\n");
            note.push_str(section);
            note.push_str("\nbody");
        }
        Ok(note)
    }
}

fn setup(generator: FakeGenerator) -> NoteService {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    NoteService::new(CacheRepository::new(db), generator)
}

fn chapter(id: &str) -> &'static Chapter {
    catalog::chapter(id).expect("chapter should exist")
}

mod cache_then_generate {
    use super::*;

    #[tokio::test]
    async fn first_read_generates_and_second_read_hits_cache() {
        let generator = FakeGenerator::default();
        let service = setup(generator.clone());
        let sci = chapter("sci-01");

        let first = service.resolve_note(sci).await;
        assert_eq!(first.source, NoteSource::Generated);
        assert_eq!(generator.calls(), 1);

        let first_line = first.content.lines().next().unwrap();
        assert!(first_line.starts_with('#'));
        assert!(first_line.contains("Chemical Reactions and Equations"));
        for marker in [
            "Overview",
            "Definitions",
            "Formulas / Dates / Events",
            "Key Concepts (Exam Points)",
            "Mnemonics",
        ] {
            assert!(first.content.contains(marker), "missing {marker}");
        }

        let second = service.resolve_note(sci).await;
        assert_eq!(second.source, NoteSource::Cache);
        assert_eq!(second.content, first.content);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn get_note_content_returns_plain_markdown() {
        let generator = FakeGenerator::default();
        let service = setup(generator.clone());

        let content = service.get_note_content(chapter("math-04")).await;
        assert!(content.starts_with("# Quadratic Equations (Class 10 Mathematics)"));
        assert_eq!(service.get_note_content(chapter("math-04")).await, content);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn cache_hit_skips_the_generator_entirely() {
        let generator = FakeGenerator::default();
        let service = setup(generator.clone());
        service.cache().put_note("eng-01", "# Pre-cached");

        let note = service.resolve_note(chapter("eng-01")).await;

        assert_eq!(note.content, "# Pre-cached");
        assert_eq!(note.source, NoteSource::Cache);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn prompt_names_the_chapter_and_subject() {
        let generator = FakeGenerator::default();
        let service = setup(generator.clone());

        service.resolve_note(chapter("sst-c-02")).await;

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Social Science chapter titled \"Federalism\""));
    }

    #[tokio::test]
    async fn generated_text_is_cached_verbatim() {
        let generator = FakeGenerator::default();
        let service = setup(generator.clone());

        let note = service.resolve_note(chapter("sci-08")).await;
        let cached = service.cache().get_note("sci-08").expect("note should be cached");
        assert_eq!(cached.content, note.content);
    }
}

mod fallbacks {
    use super::*;

    #[tokio::test]
    async fn missing_credential_serves_fallback_without_calling_generator() {
        let generator = FakeGenerator {
            no_credential: true,
            ..Default::default()
        };
        let service = setup(generator.clone());

        let note = service.resolve_note(chapter("sci-01")).await;

        assert_eq!(note.content.lines().next(), Some("# API Key Missing"));
        assert_eq!(
            note.source,
            NoteSource::Fallback {
                reason: FallbackKind::MissingCredential
            }
        );
        assert_eq!(generator.calls(), 0);
        assert!(service.cache().get_note("sci-01").is_none());
    }

    #[tokio::test]
    async fn generator_failure_serves_generic_fallback_and_is_not_cached() {
        let generator = FakeGenerator::default();
        generator.set_failing(true);
        let service = setup(generator.clone());

        let note = service.resolve_note(chapter("math-10")).await;

        assert_eq!(note.content.lines().next(), Some("# Error Generating Note"));
        assert_eq!(
            note.source,
            NoteSource::Fallback {
                reason: FallbackKind::GenerationFailed
            }
        );
        assert!(service.cache().get_note("math-10").is_none());
    }

    #[tokio::test]
    async fn next_read_after_failure_retries_generation() {
        let generator = FakeGenerator::default();
        generator.set_failing(true);
        let service = setup(generator.clone());
        let circles = chapter("math-10");

        service.resolve_note(circles).await;
        generator.set_failing(false);
        let note = service.resolve_note(circles).await;

        assert_eq!(note.source, NoteSource::Generated);
        assert_eq!(generator.calls(), 2);
        assert_eq!(
            service.cache().get_note("math-10").unwrap().content,
            note.content
        );
    }

    #[tokio::test]
    async fn missing_key_error_from_generator_maps_to_credential_page() {
        struct KeylessGenerator;

        #[async_trait]
        impl NoteGenerator for KeylessGenerator {
            async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
                Err(GenerationError::MissingApiKey)
            }
        }

        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let service = NoteService::new(CacheRepository::new(db), KeylessGenerator);

        let content = service.get_note_content(chapter("eng-04")).await;
        assert!(content.starts_with("# API Key Missing"));
    }
}

mod regeneration {
    use super::*;

    #[tokio::test]
    async fn regenerate_replaces_cached_note() {
        let generator = FakeGenerator::default();
        let service = setup(generator.clone());
        service.cache().put_note("sci-05", "# Stale");

        let note = service.regenerate(chapter("sci-05")).await;

        assert_eq!(note.source, NoteSource::Generated);
        assert_ne!(note.content, "# Stale");
        assert_eq!(generator.calls(), 1);
        assert_eq!(service.cache().get_note("sci-05").unwrap().content, note.content);
    }

    #[tokio::test]
    async fn regenerate_leaves_other_chapters_cached() {
        let generator = FakeGenerator::default();
        let service = setup(generator.clone());
        service.cache().put_note("sci-06", "# Keep me");

        service.regenerate(chapter("sci-05")).await;

        assert_eq!(service.cache().get_note("sci-06").unwrap().content, "# Keep me");
    }
}

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn duplicate_concurrent_requests_share_one_generation() {
        let generator = FakeGenerator {
            delay: Some(Duration::from_millis(50)),
            ..Default::default()
        };
        let service = setup(generator.clone());
        let sci = chapter("sci-12");

        let (a, b, c) = tokio::join!(
            service.resolve_note(sci),
            service.resolve_note(sci),
            service.resolve_note(sci),
        );

        assert_eq!(generator.calls(), 1);
        assert_eq!(a.content, b.content);
        assert_eq!(b.content, c.content);
        assert_eq!(a.source, NoteSource::Generated);
        assert_eq!(b.source, NoteSource::Cache);
    }

    #[tokio::test]
    async fn different_chapters_are_generated_independently() {
        let generator = FakeGenerator {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        };
        let service = setup(generator.clone());

        let (a, b) = tokio::join!(
            service.resolve_note(chapter("sci-01")),
            service.resolve_note(chapter("math-01")),
        );

        assert_eq!(generator.calls(), 2);
        assert_ne!(a.content, b.content);
        assert!(service.cache().get_note("sci-01").is_some());
        assert!(service.cache().get_note("math-01").is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_generation_keeps_every_chapter_cached() {
        let generator = FakeGenerator {
            delay: Some(Duration::from_millis(10)),
            ..Default::default()
        };
        let service = setup(generator.clone());
        let chapters: Vec<&'static Chapter> = catalog::chapters().iter().take(16).collect();

        let tasks: Vec<_> = chapters
            .iter()
            .map(|&ch| {
                let service = service.clone();
                tokio::spawn(async move { service.resolve_note(ch).await })
            })
            .collect();
        for task in tasks {
            let note = task.await.expect("task panicked");
            assert_eq!(note.source, NoteSource::Generated);
        }

        assert_eq!(generator.calls(), 16);
        let cached = service.cache().cached_notes();
        assert_eq!(cached.len(), 16);
        for ch in chapters {
            assert!(cached.contains_key(ch.id), "missing {}", ch.id);
        }
    }

    #[tokio::test]
    async fn generation_finishes_after_the_caller_gives_up() {
        let generator = FakeGenerator {
            delay: Some(Duration::from_millis(50)),
            ..Default::default()
        };
        let service = setup(generator.clone());
        let sci = chapter("sci-07");

        let abandoned =
            tokio::time::timeout(Duration::from_millis(5), service.resolve_note(sci)).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(generator.calls(), 1);
        assert!(service.cache().get_note("sci-07").is_some());
        let note = service.resolve_note(sci).await;
        assert_eq!(note.source, NoteSource::Cache);
        assert_eq!(generator.calls(), 1);
    }
}
