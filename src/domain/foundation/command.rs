//! Command infrastructure for handlers.
//!
//! `CommandMetadata` carries correlation context from the entry point
//! (CLI, runtime) through a handler and onto the events it publishes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EventEnvelope;

/// Metadata context for command handlers.
///
/// # Example
///
/// ```ignore
/// let metadata = CommandMetadata::new().with_source("cli");
/// let result = handler.handle(cmd, metadata).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Links every event produced by one command.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Where the command came from ("cli", "runtime", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Metadata with a fresh correlation ID.
    pub fn new() -> Self {
        Self {
            correlation_id: Some(Uuid::new_v4().to_string()),
            source: None,
        }
    }

    /// Builder: Replace the correlation ID.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Copies this context onto an outgoing event.
    pub fn stamp(&self, mut envelope: EventEnvelope) -> EventEnvelope {
        if let Some(id) = &self.correlation_id {
            envelope = envelope.with_correlation_id(id.clone());
        }
        if let Some(source) = &self.source {
            envelope = envelope.with_source(source.clone());
        }
        envelope
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Fixed metadata for assertions.
    pub fn test_fixture() -> Self {
        Self::default()
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
