//! Read model of the active session for display.

use serde::Serialize;

use super::state::{ActiveSession, SessionState};
use crate::domain::foundation::{Percentage, RecipeId, SessionPhase};
use crate::domain::recipe::StepKind;

/// Everything a session screen shows, derived from an `ActiveSession`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub recipe_id: RecipeId,
    pub recipe_title: String,
    /// 1-based.
    pub step_number: usize,
    pub step_count: usize,
    pub step_description: String,
    pub step_kind: StepKind,
    pub phase: SessionPhase,
    pub step_remaining_secs: u64,
    pub overall_remaining_secs: u64,
    pub step_progress: Percentage,
    pub overall_progress: Percentage,
}

impl SessionView {
    pub fn of(session: &ActiveSession) -> Self {
        let recipe = session.recipe();
        let progress = session.progress();
        let step = session.current_step();

        Self {
            recipe_id: recipe.id().clone(),
            recipe_title: recipe.title().to_string(),
            step_number: progress.current_step_index + 1,
            step_count: recipe.step_count(),
            step_description: step.description.clone(),
            step_kind: step.kind.clone(),
            phase: progress.phase(),
            step_remaining_secs: progress.step_remaining_secs,
            overall_remaining_secs: progress.overall_remaining_secs,
            step_progress: Percentage::consumed(step.duration_secs(), progress.step_remaining_secs),
            overall_progress: Percentage::consumed(
                recipe.total_secs(),
                progress.overall_remaining_secs,
            ),
        }
    }

    /// View of the slot, if a recipe is in it.
    pub fn of_state(state: &SessionState) -> Option<Self> {
        state.active().map(Self::of)
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn step_clock(&self) -> String {
        format_clock(self.step_remaining_secs)
    }

    pub fn overall_clock(&self) -> String {
        format_clock(self.overall_remaining_secs)
    }
}

/// `MM:SS` with zero-padded minutes. Minutes grow past two digits.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `M:SS`, for one-line status displays.
pub fn format_compact_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::recipe::carbonara;
    use crate::domain::session::SessionController;
    use std::sync::Arc;

    #[test]
    fn format_clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1_200), "20:00");
        assert_eq!(format_clock(6_000), "100:00");
    }

    #[test]
    fn format_compact_clock_does_not_pad_minutes() {
        assert_eq!(format_compact_clock(65), "1:05");
        assert_eq!(format_compact_clock(9), "0:09");
    }

    #[test]
    fn view_of_fresh_session_shows_first_step() {
        let t0 = Timestamp::from_unix_secs(0);
        let mut controller = SessionController::new();
        controller
            .start(Arc::new(carbonara(t0).unwrap()), t0)
            .unwrap();

        let view = SessionView::of_state(controller.state()).unwrap();
        assert_eq!(view.recipe_title, "Simple Pasta Carbonara");
        assert_eq!(view.step_number, 1);
        assert_eq!(view.step_count, 5);
        assert_eq!(view.step_clock(), "02:00");
        assert_eq!(view.overall_clock(), "20:00");
        assert_eq!(view.step_progress, Percentage::ZERO);
        assert!(view.is_running());
    }

    #[test]
    fn view_reports_rounded_progress() {
        let t0 = Timestamp::from_unix_secs(0);
        let mut controller = SessionController::new();
        controller
            .start(Arc::new(carbonara(t0).unwrap()), t0)
            .unwrap();
        controller.tick(t0.plus_secs(60));
        controller.pause(t0.plus_secs(60));

        let view = SessionView::of(controller.active().unwrap());
        assert_eq!(view.step_progress.value(), 50);
        // 60 of 1200 seconds.
        assert_eq!(view.overall_progress.value(), 5);
        assert_eq!(view.phase, SessionPhase::Paused);
    }

    #[test]
    fn no_view_without_session() {
        assert!(SessionView::of_state(&SessionState::NoSession).is_none());
    }
}
