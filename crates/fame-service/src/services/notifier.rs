//! Default outbound event sink

use async_trait::async_trait;
use fame_core::{DomainError, DomainEvent, EventPublisher};
use tracing::info;

/// Writes every event to the log as structured JSON
///
/// Stands in for a real transport (mail, webhook) until one is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), DomainError> {
        let payload = serde_json::to_string(event)
            .map_err(|e| DomainError::InternalError(format!("Failed to serialize event: {e}")))?;
        info!(
            target: "fame::events",
            event_type = event.event_type(),
            %payload,
            "Domain event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fame_core::events::MemberDeletedEvent;

    #[tokio::test]
    async fn test_publish_succeeds() {
        let event = DomainEvent::MemberDeleted(MemberDeletedEvent::new(5));
        assert!(LoggingEventPublisher::new().publish(&event).await.is_ok());
    }
}
