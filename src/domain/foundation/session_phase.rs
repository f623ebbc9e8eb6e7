//! SessionPhase enum for the single cooking-session slot.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Coarse lifecycle phase of the cooking session slot.
///
/// `Idle` is both the initial state and the state reached when a recipe
/// finishes or its last step is ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

impl StateMachine for SessionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            (Idle, Running)
                | (Running, Paused)
                | (Paused, Running)
                | (Running, Idle)
                | (Paused, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionPhase::*;
        match self {
            Idle => vec![Running],
            Running => vec![Paused, Idle],
            Paused => vec![Running, Idle],
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Running => "Running",
            SessionPhase::Paused => "Paused",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(SessionPhase::default(), SessionPhase::Idle);
    }

    #[test]
    fn idle_can_only_start_running() {
        assert!(SessionPhase::Idle.can_transition_to(&SessionPhase::Running));
        assert!(!SessionPhase::Idle.can_transition_to(&SessionPhase::Paused));
    }

    #[test]
    fn pause_and_resume_toggle_within_active() {
        assert!(SessionPhase::Running.can_transition_to(&SessionPhase::Paused));
        assert!(SessionPhase::Paused.can_transition_to(&SessionPhase::Running));
    }

    #[test]
    fn both_active_phases_can_finish() {
        assert!(SessionPhase::Running.can_transition_to(&SessionPhase::Idle));
        assert!(SessionPhase::Paused.can_transition_to(&SessionPhase::Idle));
    }

    #[test]
    fn no_phase_is_terminal() {
        for phase in [SessionPhase::Idle, SessionPhase::Running, SessionPhase::Paused] {
            assert!(!phase.is_terminal());
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for phase in [SessionPhase::Idle, SessionPhase::Running, SessionPhase::Paused] {
            for target in phase.valid_transitions() {
                assert!(phase.can_transition_to(&target));
            }
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&SessionPhase::Paused).unwrap();
        assert_eq!(json, "\"paused\"");
    }
}
