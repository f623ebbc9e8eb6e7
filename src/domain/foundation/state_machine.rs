//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating state transitions of
//! lifecycle statuses such as the cooking session phase.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// let next = SessionPhase::Running.transition_to(SessionPhase::Paused)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum OvenStatus {
        Cold,
        Preheating,
        Ready,
        Broken,
    }

    impl StateMachine for OvenStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use OvenStatus::*;
            match self {
                Cold => vec![Preheating, Broken],
                Preheating => vec![Ready, Cold, Broken],
                Ready => vec![Cold, Broken],
                Broken => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = OvenStatus::Cold.transition_to(OvenStatus::Preheating);
        assert_eq!(result, Ok(OvenStatus::Preheating));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        assert!(OvenStatus::Cold.transition_to(OvenStatus::Ready).is_err());
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(OvenStatus::Broken.is_terminal());
        assert!(!OvenStatus::Cold.is_terminal());
    }
}
