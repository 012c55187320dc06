//! Note generation: prompt construction, fallback pages, and the external
//! text-generation client.

mod fallback;
mod gemini;
mod prompt;

pub use fallback::*;
pub use gemini::*;
pub use prompt::*;

use async_trait::async_trait;
use thiserror::Error;

/// Generation errors.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key missing: set SHORTNOTES_API_KEY")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: API key rejected")]
    Unauthorized,

    #[error("API error: {0}")]
    Api(String),

    #[error("Response contained no text")]
    EmptyResponse,
}

impl GenerationError {
    /// Fallback page that stands in for the note when this error occurs.
    pub fn fallback_kind(&self) -> crate::models::FallbackKind {
        match self {
            Self::MissingApiKey => crate::models::FallbackKind::MissingCredential,
            _ => crate::models::FallbackKind::GenerationFailed,
        }
    }
}

/// The external collaborator that turns a prompt into Markdown.
#[async_trait]
pub trait NoteGenerator: Send + Sync {
    /// Whether a credential is available. Checked before any call so a
    /// missing key never reaches the network.
    fn has_credential(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
