//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: an interactive front end that feeds turns into the turn service.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the conversation loop until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
