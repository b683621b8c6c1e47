use thiserror::Error;

use crate::llm_client::LlmError;

/// Pipeline-level error type.
///
/// Nothing in the pipeline recovers from these: they propagate out of the
/// session and terminate the run with the carried diagnostic.
#[derive(Debug, Error)]
pub enum MimicError {
    #[error("Invalid handle: {0:?}")]
    InvalidHandle(String),

    #[error("Failed to resolve @{handle} (status {status})")]
    Resolution { handle: String, status: u16 },

    #[error("Unknown user @{handle}: {detail}")]
    UnknownUser { handle: String, detail: String },

    #[error("Failed to fetch posts for user {user_id} (status {status})")]
    Fetch { user_id: String, status: u16 },

    #[error("No original posts found for @{handle}")]
    NoPosts { handle: String },

    #[error("Timeline HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed timeline response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Generation error: {0}")]
    Generation(#[from] LlmError),

    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MimicError {
    /// HTTP status carried by resolution and fetch failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            MimicError::Resolution { status, .. } | MimicError::Fetch { status, .. } => {
                Some(*status)
            }
            MimicError::Generation(LlmError::Api { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
