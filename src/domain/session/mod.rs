//! Cooking session domain module.
//!
//! Guides the user through one recipe at a time. The session slot holds
//! at most one recipe; `SessionController` counts its steps down using
//! wall-clock deltas supplied by the caller.
//!
//! # Events
//!
//! - `SessionStarted` - Published when a recipe starts cooking
//! - `StepAdvanced` - Published when a step runs out and the next begins
//! - `StepEnded` - Published when the user ends a step early
//! - `SessionPaused` / `SessionResumed` - Published on pause and resume
//! - `SessionCompleted` - Published when the final step runs out
//! - `SessionEnded` - Published when the user ends the final step

mod controller;
mod errors;
mod events;
mod state;
mod view;

pub use controller::{elapsed_secs, SessionController, Transition};
pub use errors::SessionError;
pub use events::{
    SessionCompleted, SessionEnded, SessionEvent, SessionPaused, SessionResumed, SessionStarted,
    StepAdvanced, StepEnded,
};
pub use state::{ActiveSession, PerRecipeSession, SessionState};
pub use view::{format_clock, format_compact_clock, SessionView};
