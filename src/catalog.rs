//! Static subject and chapter catalog.
//!
//! The catalog is fixed at compile time. Lookups never allocate except for
//! the filtered lists returned by [`search`] and the bookmark helpers.

use crate::models::{Chapter, Subject, SubjectIcon, SubjectId};

const SUBJECTS: &[Subject] = &[
    Subject {
        id: SubjectId::Science,
        name: "Science",
        icon: SubjectIcon::Atom,
        color: "bg-blue-500",
        description: "Physics, Chemistry, and Biology fundamentals.",
    },
    Subject {
        id: SubjectId::Maths,
        name: "Mathematics",
        icon: SubjectIcon::Calculator,
        color: "bg-emerald-500",
        description: "Formulas, theorems, and problem-solving.",
    },
    Subject {
        id: SubjectId::SocialScience,
        name: "Social Science",
        icon: SubjectIcon::Globe,
        color: "bg-amber-500",
        description: "History, Geography, Civics, and Economics.",
    },
    Subject {
        id: SubjectId::English,
        name: "English",
        icon: SubjectIcon::BookOpen,
        color: "bg-rose-500",
        description: "Literature, grammar, and comprehension.",
    },
];

const fn entry(id: &'static str, title: &'static str, subject: SubjectId) -> Chapter {
    Chapter { id, title, subject }
}

// Class 10 NCERT chapters, in textbook order within each subject.
const CHAPTERS: &[Chapter] = &[
    entry("sci-01", "Chemical Reactions and Equations", SubjectId::Science),
    entry("sci-02", "Acids, Bases and Salts", SubjectId::Science),
    entry("sci-03", "Metals and Non-metals", SubjectId::Science),
    entry("sci-04", "Carbon and its Compounds", SubjectId::Science),
    entry("sci-05", "Life Processes", SubjectId::Science),
    entry("sci-06", "Control and Coordination", SubjectId::Science),
    entry("sci-07", "How do Organisms Reproduce?", SubjectId::Science),
    entry("sci-08", "Heredity", SubjectId::Science),
    entry("sci-09", "Light – Reflection and Refraction", SubjectId::Science),
    entry("sci-10", "The Human Eye and the Colourful World", SubjectId::Science),
    entry("sci-11", "Electricity", SubjectId::Science),
    entry("sci-12", "Magnetic Effects of Electric Current", SubjectId::Science),
    entry("sci-13", "Our Environment", SubjectId::Science),
    entry("math-01", "Real Numbers", SubjectId::Maths),
    entry("math-02", "Polynomials", SubjectId::Maths),
    entry("math-03", "Pair of Linear Equations in Two Variables", SubjectId::Maths),
    entry("math-04", "Quadratic Equations", SubjectId::Maths),
    entry("math-05", "Arithmetic Progressions", SubjectId::Maths),
    entry("math-06", "Triangles", SubjectId::Maths),
    entry("math-07", "Coordinate Geometry", SubjectId::Maths),
    entry("math-08", "Introduction to Trigonometry", SubjectId::Maths),
    entry("math-09", "Some Applications of Trigonometry", SubjectId::Maths),
    entry("math-10", "Circles", SubjectId::Maths),
    entry("math-11", "Areas Related to Circles", SubjectId::Maths),
    entry("math-12", "Surface Areas and Volumes", SubjectId::Maths),
    entry("math-13", "Statistics", SubjectId::Maths),
    entry("math-14", "Probability", SubjectId::Maths),
    entry("sst-h-01", "The Rise of Nationalism in Europe", SubjectId::SocialScience),
    entry("sst-h-02", "Nationalism in India", SubjectId::SocialScience),
    entry("sst-h-03", "The Making of a Global World", SubjectId::SocialScience),
    entry("sst-h-04", "The Age of Industrialisation", SubjectId::SocialScience),
    entry("sst-g-01", "Resources and Development", SubjectId::SocialScience),
    entry("sst-g-02", "Forest and Wildlife Resources", SubjectId::SocialScience),
    entry("sst-g-03", "Water Resources", SubjectId::SocialScience),
    entry("sst-g-04", "Agriculture", SubjectId::SocialScience),
    entry("sst-g-05", "Minerals and Energy Resources", SubjectId::SocialScience),
    entry("sst-c-01", "Power Sharing", SubjectId::SocialScience),
    entry("sst-c-02", "Federalism", SubjectId::SocialScience),
    entry("sst-c-03", "Gender, Religion and Caste", SubjectId::SocialScience),
    entry("sst-e-01", "Development", SubjectId::SocialScience),
    entry("sst-e-02", "Sectors of the Indian Economy", SubjectId::SocialScience),
    entry("sst-e-03", "Money and Credit", SubjectId::SocialScience),
    entry("sst-e-04", "Globalisation and the Indian Economy", SubjectId::SocialScience),
    entry("eng-01", "A Letter to God", SubjectId::English),
    entry("eng-02", "Nelson Mandela: Long Walk to Freedom", SubjectId::English),
    entry("eng-03", "Two Stories about Flying", SubjectId::English),
    entry("eng-04", "From the Diary of Anne Frank", SubjectId::English),
    entry("eng-05", "Glimpses of India", SubjectId::English),
    entry("eng-06", "Mijbil the Otter", SubjectId::English),
    entry("eng-07", "Madam Rides the Bus", SubjectId::English),
    entry("eng-08", "The Sermon at Benares", SubjectId::English),
    entry("eng-09", "The Proposal", SubjectId::English),
];

/// Number of bookmarks shown on the home screen shelf.
pub const QUICK_ACCESS_LIMIT: usize = 3;

pub fn subjects() -> &'static [Subject] {
    SUBJECTS
}

/// Look up a subject. Every [`SubjectId`] has exactly one catalog entry.
pub fn subject(id: SubjectId) -> &'static Subject {
    match id {
        SubjectId::Science => &SUBJECTS[0],
        SubjectId::Maths => &SUBJECTS[1],
        SubjectId::SocialScience => &SUBJECTS[2],
        SubjectId::English => &SUBJECTS[3],
    }
}

/// Look up a subject by its wire tag (e.g. `social_science`).
pub fn subject_by_tag(tag: &str) -> Option<&'static Subject> {
    SubjectId::from_str(tag).map(subject)
}

pub fn chapters() -> &'static [Chapter] {
    CHAPTERS
}

pub fn chapter(id: &str) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|c| c.id == id)
}

pub fn chapters_for(subject: SubjectId) -> Vec<&'static Chapter> {
    CHAPTERS.iter().filter(|c| c.subject == subject).collect()
}

/// Case-insensitive match on chapter title or subject name.
///
/// A blank query matches every chapter.
pub fn search(query: &str) -> Vec<&'static Chapter> {
    let needle = query.trim().to_lowercase();
    CHAPTERS
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.title.to_lowercase().contains(&needle)
                || subject(c.subject).name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Chapters whose id appears in `ids`, in catalog order.
///
/// Ids that are not in the catalog are skipped.
pub fn bookmarked_chapters(ids: &[String]) -> Vec<&'static Chapter> {
    CHAPTERS
        .iter()
        .filter(|c| ids.iter().any(|id| id == c.id))
        .collect()
}

/// Chapters among the first `limit` bookmarks, in catalog order.
pub fn quick_access(ids: &[String], limit: usize) -> Vec<&'static Chapter> {
    let head = &ids[..ids.len().min(limit)];
    bookmarked_chapters(head)
}
