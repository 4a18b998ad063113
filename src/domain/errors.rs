//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Page models render them with `to_string()`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Non-OK HTTP response. `message` is the body's `detail` when present.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Input(String),

    /// The user aborted an interactive prompt (Ctrl-C).
    #[error("Interrupted")]
    Interrupted,
}

impl DomainError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            DomainError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}
