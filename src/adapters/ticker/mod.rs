//! Tick source adapters.
//!
//! - `IntervalTickSource` - tokio interval, used by the binary
//! - `ManualTickSource` - fires on demand, used by tests

mod interval;
mod manual;

pub use interval::IntervalTickSource;
pub use manual::ManualTickSource;
