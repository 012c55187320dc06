use crate::catalog;
use crate::models::Chapter;

/// Section headings every generated note is asked to use, in order.
pub const NOTE_SECTIONS: [&str; 5] = [
    "## 1. Quick Overview",
    "## 2. Key Definitions & Terms",
    "## 3. Important Formulas / Dates / Events",
    "## 4. Key Concepts (Exam Points)",
    "## 5. Quick Revision Mnemonics / Tips",
];

/// Title heading a note for `chapter` starts with.
pub fn note_title(chapter: &Chapter) -> String {
    let subject = catalog::subject(chapter.subject).name;
    format!("# {} (Class 10 {})", chapter.title, subject)
}

/// Build the generation prompt for a chapter.
///
/// The prompt fixes the five-section layout so rendered notes are
/// structurally predictable.
pub fn build_prompt(chapter: &Chapter) -> String {
    let subject = catalog::subject(chapter.subject).name;
    let [overview, definitions, formulas, concepts, tips] = NOTE_SECTIONS;

    format!(
        "You are an expert Class 10 teacher. Create a concise, exam-oriented revision note \
for the Class 10 NCERT {subject} chapter titled \"{title}\".

Format the output in clean, structured Markdown.

Structure the note exactly as follows:
{heading}

{overview}
(A 2-3 sentence summary of the chapter's central theme)

{definitions}
(List 3-5 critical definitions or terms with simple explanations)

{formulas}
(If Math/Science: Formulas; If History: Dates; If English: Character sketch or Themes. Use tables if appropriate.)

{concepts}
*   **Concept 1**: Description
*   **Concept 2**: Description
*   (Focus on high-yield topics often asked in exams)

{tips}
(One or two tips to remember this chapter easily)

Do not use complex jargon. Keep language student-friendly. Keep the length suitable for a 5-minute read.
",
        title = chapter.title,
        heading = note_title(chapter),
    )
}
