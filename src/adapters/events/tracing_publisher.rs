//! Event publisher that writes every event to the `tracing` log.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Logs events at `info` with their metadata as structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            source = event.metadata.source.as_deref().unwrap_or("-"),
            correlation_id = event.metadata.correlation_id.as_deref().unwrap_or("-"),
            "Event published"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, EventMetadata, Timestamp};

    fn envelope() -> EventEnvelope {
        EventEnvelope {
            event_id: EventId::new(),
            event_type: "cooking_session.paused.v1".to_string(),
            schema_version: 1,
            aggregate_id: "demo-1".to_string(),
            aggregate_type: "CookingSession".to_string(),
            occurred_at: Timestamp::now(),
            payload: serde_json::Value::Null,
            metadata: EventMetadata::default(),
        }
    }

    #[tokio::test]
    async fn log_only_publisher_accepts_events() {
        let publisher = TracingEventPublisher::new();
        assert!(publisher.publish(envelope()).await.is_ok());
    }
}
