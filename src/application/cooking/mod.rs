//! Cooking session runtime.
//!
//! Owns the single session slot on a dedicated task and exposes it through
//! a cloneable [`SessionHandle`].

mod handle;
mod runtime;

pub use handle::SessionHandle;
pub use runtime::SessionRuntime;
