//! EventPublisher port - Interface for publishing domain events.
//!
//! The session runtime and the catalog handlers publish through this port
//! without knowing whether events are captured in memory, logged, or both.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Events from one transition are handed over together, in the order the
/// transition emitted them.
///
/// # Example
///
/// ```ignore
/// let envelope = SessionEvent::Started(started).to_envelope()?;
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several events, preserving order.
    ///
    /// The default publishes one at a time and stops at the first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::domain::foundation::{EventId, EventMetadata, Timestamp};

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}

    struct Recording(Mutex<Vec<String>>);

    #[async_trait]
    impl EventPublisher for Recording {
        async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
            self.0.lock().unwrap().push(event.event_type);
            Ok(())
        }
    }

    fn envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: EventId::new(),
            event_type: event_type.to_string(),
            schema_version: 1,
            aggregate_id: "demo-1".to_string(),
            aggregate_type: "CookingSession".to_string(),
            occurred_at: Timestamp::now(),
            payload: serde_json::Value::Null,
            metadata: EventMetadata::default(),
        }
    }

    #[tokio::test]
    async fn default_publish_all_preserves_order() {
        let publisher = Recording(Mutex::new(Vec::new()));
        publisher
            .publish_all(vec![envelope("a.v1"), envelope("b.v1")])
            .await
            .unwrap();

        assert_eq!(*publisher.0.lock().unwrap(), vec!["a.v1", "b.v1"]);
    }
}
