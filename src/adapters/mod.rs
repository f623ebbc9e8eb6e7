//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event publishers (in-memory bus, tracing log)
//! - `storage` - Key-value stores (files, memory)
//! - `recipes` - Recipe repository over a key-value store
//! - `clock` - System and manual clocks
//! - `ticker` - Tick sources for running sessions

pub mod clock;
pub mod events;
pub mod recipes;
pub mod storage;
pub mod ticker;

pub use clock::{ManualClock, SystemClock};
pub use events::{InMemoryEventBus, TracingEventPublisher};
pub use recipes::{KeyValueRecipeRepository, RECIPES_KEY};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use ticker::{IntervalTickSource, ManualTickSource};
