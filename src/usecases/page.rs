//! Page-level error surface shared by the page models.

use crate::domain::DomainError;
use tracing::warn;

/// Last failure of a page, rendered inline as plain text. Cleared by the next success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageError(Option<String>);

impl PageError {
    /// Keep the value on success; store the message and yield `None` on failure.
    pub fn capture<T>(&mut self, result: Result<T, DomainError>) -> Option<T> {
        match result {
            Ok(v) => {
                self.0 = None;
                Some(v)
            }
            Err(e) => {
                warn!(error = %e, "page action failed");
                self.0 = Some(e.to_string());
                None
            }
        }
    }

    pub fn set(&mut self, message: impl Into<String>) {
        self.0 = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }
}
