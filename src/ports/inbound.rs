//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the dashboard front end drives the page models.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive dashboard until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
