use crate::models::FallbackKind;

const MISSING_CREDENTIAL_PAGE: &str = "# API Key Missing\n\n\
Please provide a valid `SHORTNOTES_API_KEY` in the environment variables to generate notes.";

const GENERATION_FAILED_PAGE: &str = "# Error Generating Note\n\n\
There was an error connecting to the AI service. Please check your connection and try again.";

impl FallbackKind {
    /// The fixed Markdown page served in place of a note.
    pub fn page(&self) -> &'static str {
        match self {
            Self::MissingCredential => MISSING_CREDENTIAL_PAGE,
            Self::GenerationFailed => GENERATION_FAILED_PAGE,
        }
    }
}
