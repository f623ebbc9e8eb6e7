//! Cooking session events.
//!
//! Events emitted by session transitions:
//! - `SessionStarted` - A recipe entered the slot
//! - `StepAdvanced` - A step ran out and the next one began
//! - `StepEnded` - The user ended a step early
//! - `SessionPaused` / `SessionResumed` - Countdown halted or restarted
//! - `SessionCompleted` - The final step ran out
//! - `SessionEnded` - The user ended the final step

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventEnvelope, EventId, RecipeId, SerializableDomainEvent, Timestamp,
};

// ════════════════════════════════════════════════════════════════════════════
// SessionStarted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a recipe starts cooking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStarted {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    pub step_count: usize,
    /// Full duration of the first step.
    pub step_secs: u64,
    /// Sum of all step durations.
    pub overall_secs: u64,
    pub started_at: Timestamp,
}

domain_event!(
    SessionStarted,
    event_type = "cooking_session.started.v1",
    aggregate_id = recipe_id,
    aggregate_type = "CookingSession",
    occurred_at = started_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// StepAdvanced
// ════════════════════════════════════════════════════════════════════════════

/// Published when a tick runs a non-final step out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepAdvanced {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    pub step_index: usize,
    /// Full duration of the step now running.
    pub step_secs: u64,
    pub overall_remaining_secs: u64,
    pub advanced_at: Timestamp,
}

domain_event!(
    StepAdvanced,
    event_type = "cooking_session.step_advanced.v1",
    aggregate_id = recipe_id,
    aggregate_type = "CookingSession",
    occurred_at = advanced_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// StepEnded
// ════════════════════════════════════════════════════════════════════════════

/// Published when the user ends a non-final step early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEnded {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    /// Index of the step that was ended.
    pub ended_step_index: usize,
    /// Index of the step now running.
    pub step_index: usize,
    /// Time left on the ended step, removed from the overall countdown.
    pub skipped_secs: u64,
    pub overall_remaining_secs: u64,
    pub ended_at: Timestamp,
}

domain_event!(
    StepEnded,
    event_type = "cooking_session.step_ended.v1",
    aggregate_id = recipe_id,
    aggregate_type = "CookingSession",
    occurred_at = ended_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionPaused
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPaused {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    pub step_index: usize,
    pub step_remaining_secs: u64,
    pub paused_at: Timestamp,
}

domain_event!(
    SessionPaused,
    event_type = "cooking_session.paused.v1",
    aggregate_id = recipe_id,
    aggregate_type = "CookingSession",
    occurred_at = paused_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionResumed
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResumed {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    pub step_index: usize,
    pub step_remaining_secs: u64,
    pub resumed_at: Timestamp,
}

domain_event!(
    SessionResumed,
    event_type = "cooking_session.resumed.v1",
    aggregate_id = recipe_id,
    aggregate_type = "CookingSession",
    occurred_at = resumed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionCompleted
// ════════════════════════════════════════════════════════════════════════════

/// Published when the final step's countdown reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCompleted {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    pub completed_at: Timestamp,
}

domain_event!(
    SessionCompleted,
    event_type = "cooking_session.completed.v1",
    aggregate_id = recipe_id,
    aggregate_type = "CookingSession",
    occurred_at = completed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionEnded
// ════════════════════════════════════════════════════════════════════════════

/// Published when the user ends the final step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEnded {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    /// Time that was still left on the final step.
    pub skipped_secs: u64,
    pub ended_at: Timestamp,
}

domain_event!(
    SessionEnded,
    event_type = "cooking_session.ended.v1",
    aggregate_id = recipe_id,
    aggregate_type = "CookingSession",
    occurred_at = ended_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionEvent
// ════════════════════════════════════════════════════════════════════════════

/// Any event a session transition can emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    Started(SessionStarted),
    StepAdvanced(StepAdvanced),
    StepEnded(StepEnded),
    Paused(SessionPaused),
    Resumed(SessionResumed),
    Completed(SessionCompleted),
    Ended(SessionEnded),
}

impl SessionEvent {
    pub fn recipe_id(&self) -> &RecipeId {
        match self {
            SessionEvent::Started(e) => &e.recipe_id,
            SessionEvent::StepAdvanced(e) => &e.recipe_id,
            SessionEvent::StepEnded(e) => &e.recipe_id,
            SessionEvent::Paused(e) => &e.recipe_id,
            SessionEvent::Resumed(e) => &e.recipe_id,
            SessionEvent::Completed(e) => &e.recipe_id,
            SessionEvent::Ended(e) => &e.recipe_id,
        }
    }

    /// True for the events that clear the slot.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionEvent::Completed(_) | SessionEvent::Ended(_))
    }

    /// Wraps the inner event for transport.
    pub fn to_envelope(&self) -> Result<EventEnvelope, serde_json::Error> {
        match self {
            SessionEvent::Started(e) => e.to_envelope(),
            SessionEvent::StepAdvanced(e) => e.to_envelope(),
            SessionEvent::StepEnded(e) => e.to_envelope(),
            SessionEvent::Paused(e) => e.to_envelope(),
            SessionEvent::Resumed(e) => e.to_envelope(),
            SessionEvent::Completed(e) => e.to_envelope(),
            SessionEvent::Ended(e) => e.to_envelope(),
        }
    }
}
