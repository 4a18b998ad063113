//! In-memory clipboard. Keeps every copied text; used when no system tool is wanted.

use crate::domain::DomainError;
use crate::ports::ClipboardPort;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryClipboard {
    copied: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently copied text.
    pub async fn last(&self) -> Option<String> {
        self.copied.lock().await.last().cloned()
    }

    pub async fn count(&self) -> usize {
        self.copied.lock().await.len()
    }
}

#[async_trait::async_trait]
impl ClipboardPort for MemoryClipboard {
    async fn copy(&self, text: &str) -> Result<(), DomainError> {
        self.copied.lock().await.push(text.to_string());
        Ok(())
    }
}
