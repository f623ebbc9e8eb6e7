//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `RecipeRepository` - Recipe catalog persistence
//! - `KeyValueStore` - Raw string storage the catalog is kept in
//!
//! ## Session Ports
//!
//! - `Clock` - Current time for user-initiated transitions
//! - `TickSource` - Heartbeat while a session is running
//! - `EventPublisher` - Port for publishing domain events

mod clock;
mod event_publisher;
mod key_value_store;
mod recipe_repository;
mod tick_source;

pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
pub use recipe_repository::{RecipeRepository, UpsertOutcome};
pub use tick_source::{Tick, TickHandle, TickSink, TickSource, TICK_PERIOD};
