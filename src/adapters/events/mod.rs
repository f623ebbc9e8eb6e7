//! Event publisher adapters.
//!
//! - `InMemoryEventBus` - Captures events and fans them out to subscribers
//! - `TracingEventPublisher` - Logs every event

mod in_memory;
mod tracing_publisher;

pub use in_memory::InMemoryEventBus;
pub use tracing_publisher::TracingEventPublisher;
