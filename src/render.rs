//! ASCII tree rendering for the chapter catalog.

use std::collections::BTreeSet;

use crate::cache::CacheRepository;
use crate::catalog;
use crate::models::{Chapter, SubjectId};

const BOOKMARKED: char = '★';
const CACHED: char = '●';
const NOT_CACHED: char = '○';

/// Per-chapter state shown next to each title.
pub trait ChapterMarks {
    fn is_bookmarked(&self, chapter: &Chapter) -> bool;
    fn is_cached(&self, chapter: &Chapter) -> bool;
}

/// Bookmark and cache state read once from the repository.
pub struct StoreMarks {
    bookmarks: Vec<String>,
    cached: BTreeSet<String>,
}

impl StoreMarks {
    pub fn load(cache: &CacheRepository) -> Self {
        Self {
            bookmarks: cache.get_bookmarks(),
            cached: cache.cached_notes().into_keys().collect(),
        }
    }
}

impl ChapterMarks for StoreMarks {
    fn is_bookmarked(&self, chapter: &Chapter) -> bool {
        self.bookmarks.iter().any(|id| id == chapter.id)
    }

    fn is_cached(&self, chapter: &Chapter) -> bool {
        self.cached.contains(chapter.id)
    }
}

fn chapter_symbol(marks: &impl ChapterMarks, chapter: &Chapter) -> char {
    if marks.is_bookmarked(chapter) {
        BOOKMARKED
    } else if marks.is_cached(chapter) {
        CACHED
    } else {
        NOT_CACHED
    }
}

/// Render chapters grouped by subject, in catalog order.
///
/// Subjects with no chapters in `chapters` are left out.
///
/// Example output:
/// ```text
/// ⚛ Science
/// ├── ★ Chemical Reactions and Equations  [sci-01]
/// └── ○ Acids, Bases and Salts  [sci-02]
/// ```
pub fn render_chapters(chapters: &[&Chapter], marks: &impl ChapterMarks) -> String {
    let mut output = String::new();
    for subject in catalog::subjects() {
        let group: Vec<&Chapter> = chapters
            .iter()
            .copied()
            .filter(|c| c.subject == subject.id)
            .collect();
        if group.is_empty() {
            continue;
        }
        render_subject(&mut output, subject.id, &group, marks);
    }
    output
}

fn render_subject(
    output: &mut String,
    subject: SubjectId,
    chapters: &[&Chapter],
    marks: &impl ChapterMarks,
) {
    let subject = catalog::subject(subject);
    output.push(subject.icon.glyph());
    output.push(' ');
    output.push_str(subject.name);
    output.push('\n');

    for (i, chapter) in chapters.iter().enumerate() {
        let branch = if i == chapters.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        output.push_str(branch);
        output.push(chapter_symbol(marks, chapter));
        output.push(' ');
        output.push_str(chapter.title);
        output.push_str("  [");
        output.push_str(chapter.id);
        output.push_str("]\n");
    }
}

/// One line per subject: glyph, name, chapter count, description.
pub fn render_subjects() -> String {
    let mut output = String::new();
    for subject in catalog::subjects() {
        output.push_str(&format!(
            "{} {:<15} {:>2} chapters  {}  ({})\n",
            subject.icon.glyph(),
            subject.name,
            catalog::chapters_for(subject.id).len(),
            subject.description,
            subject.id.as_str(),
        ));
    }
    output
}
