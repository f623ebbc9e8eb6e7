//! Cooking session state machine.
//!
//! `SessionController` owns the single session slot and applies user
//! commands and ticks to it. Every operation takes the current time from the
//! caller and returns the resulting state together with the events emitted,
//! so the controller itself never reads a clock and never blocks.
//!
//! Ticks are drift-corrected: the countdown subtracts the whole seconds
//! elapsed since the previous tick (at least one), not a fixed amount per
//! call. A delayed tick therefore catches up in one step.

use std::sync::Arc;

use tracing::debug;

use super::errors::SessionError;
use super::events::{
    SessionCompleted, SessionEnded, SessionEvent, SessionPaused, SessionResumed, SessionStarted,
    StepAdvanced, StepEnded,
};
use super::state::{ActiveSession, PerRecipeSession, SessionState};
use crate::domain::foundation::{EventId, SessionPhase, StateMachine, Timestamp};
use crate::domain::recipe::Recipe;

/// Outcome of one controller operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the operation.
    pub state: SessionState,
    /// Events emitted, in order. Empty for no-ops.
    pub events: Vec<SessionEvent>,
}

/// Seconds to subtract for a tick at `now`.
///
/// Always at least one, so a tick that arrives early or against a clock
/// that went backwards still counts down.
pub fn elapsed_secs(last_tick_at: Option<Timestamp>, now: Timestamp) -> u64 {
    match last_tick_at {
        Some(last) => now.whole_seconds_since(&last).max(1) as u64,
        None => 1,
    }
}

enum TickOutcome {
    Counted,
    Advanced(StepAdvanced),
    Completed(SessionCompleted),
}

/// Drives the single cooking session.
#[derive(Debug, Default)]
pub struct SessionController {
    state: SessionState,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.state.active()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    fn transition(&self, events: Vec<SessionEvent>) -> Transition {
        Transition {
            state: self.state.clone(),
            events,
        }
    }

    fn unchanged(&self) -> Transition {
        self.transition(Vec::new())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts cooking `recipe` from its first step.
    ///
    /// # Errors
    ///
    /// - `SessionError::Conflict` if a session is already active; the
    ///   current session is left untouched.
    pub fn start(&mut self, recipe: Arc<Recipe>, now: Timestamp) -> Result<Transition, SessionError> {
        if let Some(active) = self.state.active() {
            return Err(SessionError::conflict(active.recipe_id().clone()));
        }

        let progress = PerRecipeSession::begin(&recipe, now);
        let event = SessionStarted {
            event_id: EventId::new(),
            recipe_id: recipe.id().clone(),
            step_count: recipe.step_count(),
            step_secs: progress.step_remaining_secs,
            overall_secs: progress.overall_remaining_secs,
            started_at: now,
        };

        debug!(
            recipe_id = %recipe.id(),
            steps = recipe.step_count(),
            overall_secs = progress.overall_remaining_secs,
            "Session started"
        );

        self.state = SessionState::Active(ActiveSession::new(recipe, progress));
        Ok(self.transition(vec![SessionEvent::Started(event)]))
    }

    /// Applies the time elapsed since the previous tick.
    ///
    /// No-op unless a session is active and running.
    pub fn tick(&mut self, now: Timestamp) -> Transition {
        let outcome = match &mut self.state {
            SessionState::Active(session) if session.is_running() => Self::apply_tick(session, now),
            _ => return self.unchanged(),
        };

        match outcome {
            TickOutcome::Counted => self.unchanged(),
            TickOutcome::Advanced(event) => self.transition(vec![SessionEvent::StepAdvanced(event)]),
            TickOutcome::Completed(event) => {
                debug!(recipe_id = %event.recipe_id, "Session completed");
                self.state = SessionState::NoSession;
                self.transition(vec![SessionEvent::Completed(event)])
            }
        }
    }

    fn apply_tick(session: &mut ActiveSession, now: Timestamp) -> TickOutcome {
        let recipe = Arc::clone(session.recipe());
        let is_last = session.is_last_step();
        let progress = session.progress_mut();

        let elapsed = elapsed_secs(progress.last_tick_at, now);
        progress.step_remaining_secs = progress.step_remaining_secs.saturating_sub(elapsed);
        progress.overall_remaining_secs = progress.overall_remaining_secs.saturating_sub(elapsed);

        if progress.step_remaining_secs > 0 {
            progress.last_tick_at = Some(now);
            return TickOutcome::Counted;
        }

        if is_last {
            return TickOutcome::Completed(SessionCompleted {
                event_id: EventId::new(),
                recipe_id: recipe.id().clone(),
                completed_at: now,
            });
        }

        // Overshoot past the step boundary is not carried into the next step.
        progress.current_step_index += 1;
        let next = &recipe.steps()[progress.current_step_index];
        progress.step_remaining_secs = next.duration_secs();
        progress.last_tick_at = Some(now);

        debug!(
            recipe_id = %recipe.id(),
            step_index = progress.current_step_index,
            elapsed,
            "Step advanced"
        );

        TickOutcome::Advanced(StepAdvanced {
            event_id: EventId::new(),
            recipe_id: recipe.id().clone(),
            step_index: progress.current_step_index,
            step_secs: progress.step_remaining_secs,
            overall_remaining_secs: progress.overall_remaining_secs,
            advanced_at: now,
        })
    }

    /// Halts the countdown. Counters are left as they are.
    ///
    /// No-op with no session; pausing a paused session emits nothing.
    pub fn pause(&mut self, now: Timestamp) -> Transition {
        let Some(session) = self.state.active_mut() else {
            return self.unchanged();
        };
        if !session.progress().phase().can_transition_to(&SessionPhase::Paused) {
            return self.unchanged();
        }

        let recipe_id = session.recipe_id().clone();
        let progress = session.progress_mut();
        progress.is_running = false;

        let event = SessionPaused {
            event_id: EventId::new(),
            recipe_id,
            step_index: progress.current_step_index,
            step_remaining_secs: progress.step_remaining_secs,
            paused_at: now,
        };
        debug!(recipe_id = %event.recipe_id, step_index = event.step_index, "Session paused");
        self.transition(vec![SessionEvent::Paused(event)])
    }

    /// Restarts the countdown from `now`.
    ///
    /// The tick baseline is reset even if the session was already running,
    /// so time spent before the call is never charged to the countdown.
    pub fn resume(&mut self, now: Timestamp) -> Transition {
        let Some(session) = self.state.active_mut() else {
            return self.unchanged();
        };

        let recipe_id = session.recipe_id().clone();
        let progress = session.progress_mut();
        let was_paused = !progress.is_running;
        progress.is_running = true;
        progress.last_tick_at = Some(now);

        if !was_paused {
            return self.unchanged();
        }

        let event = SessionResumed {
            event_id: EventId::new(),
            recipe_id,
            step_index: progress.current_step_index,
            step_remaining_secs: progress.step_remaining_secs,
            resumed_at: now,
        };
        debug!(recipe_id = %event.recipe_id, step_index = event.step_index, "Session resumed");
        self.transition(vec![SessionEvent::Resumed(event)])
    }

    /// Ends the current step early, running or not.
    ///
    /// On the final step this ends the session. Otherwise the next step
    /// starts running at full duration and the time left on the ended step
    /// is removed from the overall countdown.
    pub fn end_step(&mut self, now: Timestamp) -> Transition {
        let Some(session) = self.state.active_mut() else {
            return self.unchanged();
        };

        let recipe = Arc::clone(session.recipe());
        let is_last = session.is_last_step();
        let progress = session.progress_mut();
        let skipped_secs = progress.step_remaining_secs;

        if is_last {
            let event = SessionEnded {
                event_id: EventId::new(),
                recipe_id: recipe.id().clone(),
                skipped_secs,
                ended_at: now,
            };
            debug!(recipe_id = %event.recipe_id, "Session ended on final step");
            self.state = SessionState::NoSession;
            return self.transition(vec![SessionEvent::Ended(event)]);
        }

        let ended_step_index = progress.current_step_index;
        progress.current_step_index += 1;
        progress.step_remaining_secs = recipe.steps()[progress.current_step_index].duration_secs();
        progress.overall_remaining_secs = progress.overall_remaining_secs.saturating_sub(skipped_secs);
        progress.is_running = true;
        progress.last_tick_at = Some(now);

        let event = StepEnded {
            event_id: EventId::new(),
            recipe_id: recipe.id().clone(),
            ended_step_index,
            step_index: progress.current_step_index,
            skipped_secs,
            overall_remaining_secs: progress.overall_remaining_secs,
            ended_at: now,
        };
        debug!(
            recipe_id = %event.recipe_id,
            step_index = event.step_index,
            skipped_secs,
            "Step ended"
        );
        self.transition(vec![SessionEvent::StepEnded(event)])
    }
}

#[cfg(test)]
impl Transition {
    fn is_noop(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
impl SessionController {
    /// Controller holding a hand-built state.
    pub fn from_state(state: SessionState) -> Self {
        Self { state }
    }
}
