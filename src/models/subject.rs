use serde::Serialize;

/// A top-level grouping of chapters.
///
/// Subjects are defined once in the static catalog and never change at
/// runtime. Display metadata travels with the subject so front ends do not
/// need their own lookup tables.
#[derive(Debug, Clone, Serialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: &'static str,
    pub icon: SubjectIcon,
    /// Presentation color tag, passed through to front ends untouched.
    pub color: &'static str,
    pub description: &'static str,
}

/// Identifier of a subject in the catalog.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SubjectId {
    Science,
    Maths,
    SocialScience,
    English,
}

impl SubjectId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Science => "science",
            Self::Maths => "maths",
            Self::SocialScience => "social_science",
            Self::English => "english",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "science" => Some(Self::Science),
            "maths" => Some(Self::Maths),
            "social_science" => Some(Self::SocialScience),
            "english" => Some(Self::English),
            _ => None,
        }
    }
}

/// Icon shown next to a subject.
///
/// The set is closed: unknown tags are rejected by [`SubjectIcon::from_tag`]
/// instead of silently falling back to a default.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubjectIcon {
    Atom,
    Calculator,
    Globe,
    BookOpen,
}

impl SubjectIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Atom => "atom",
            Self::Calculator => "calculator",
            Self::Globe => "globe",
            Self::BookOpen => "book_open",
        }
    }

    /// Parse an icon tag. Accepts both `book_open` and `BookOpen` spellings.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "atom" | "Atom" => Some(Self::Atom),
            "calculator" | "Calculator" => Some(Self::Calculator),
            "globe" | "Globe" => Some(Self::Globe),
            "book_open" | "BookOpen" => Some(Self::BookOpen),
            _ => None,
        }
    }

    /// Terminal glyph for the icon.
    pub fn glyph(&self) -> char {
        match self {
            Self::Atom => '⚛',
            Self::Calculator => '∑',
            Self::Globe => '◍',
            Self::BookOpen => '✎',
        }
    }
}
