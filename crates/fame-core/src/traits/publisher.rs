//! Outbound event port
//!
//! The workflow hands every committed transition to an `EventPublisher`. The transport
//! (email, webhook, chat bot) lives behind this trait.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::events::DomainEvent;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Deliver an event; callers log and ignore failures
    async fn publish(&self, event: &DomainEvent) -> Result<(), DomainError>;
}
