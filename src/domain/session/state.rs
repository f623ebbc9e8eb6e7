//! The single cooking-session slot.

use std::sync::Arc;

use crate::domain::foundation::{RecipeId, SessionPhase, Timestamp};
use crate::domain::recipe::{Recipe, RecipeStep};

/// Progress of the recipe currently being cooked.
///
/// # Invariants
///
/// - `current_step_index < recipe.step_count()`
/// - `step_remaining_secs <= current step duration`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerRecipeSession {
    pub current_step_index: usize,
    pub is_running: bool,
    pub step_remaining_secs: u64,
    pub overall_remaining_secs: u64,
    /// Baseline for the next elapsed-time computation.
    pub last_tick_at: Option<Timestamp>,
}

impl PerRecipeSession {
    /// Fresh progress for `recipe`, running from `now`.
    pub fn begin(recipe: &Recipe, now: Timestamp) -> Self {
        Self {
            current_step_index: 0,
            is_running: true,
            step_remaining_secs: recipe.first_step().duration_secs(),
            overall_remaining_secs: recipe.total_secs(),
            last_tick_at: Some(now),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_running {
            SessionPhase::Running
        } else {
            SessionPhase::Paused
        }
    }
}

/// A recipe snapshot together with its progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    recipe: Arc<Recipe>,
    progress: PerRecipeSession,
}

impl ActiveSession {
    pub fn new(recipe: Arc<Recipe>, progress: PerRecipeSession) -> Self {
        Self { recipe, progress }
    }

    pub fn recipe(&self) -> &Arc<Recipe> {
        &self.recipe
    }

    pub fn recipe_id(&self) -> &RecipeId {
        self.recipe.id()
    }

    pub fn progress(&self) -> &PerRecipeSession {
        &self.progress
    }

    pub(crate) fn progress_mut(&mut self) -> &mut PerRecipeSession {
        &mut self.progress
    }

    pub fn current_step(&self) -> &RecipeStep {
        // Index is kept in bounds by the controller.
        &self.recipe.steps()[self.progress.current_step_index]
    }

    pub fn is_last_step(&self) -> bool {
        self.progress.current_step_index >= self.recipe.last_step_index()
    }

    pub fn is_running(&self) -> bool {
        self.progress.is_running
    }
}

/// Whether a recipe is being cooked right now. At most one at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    NoSession,
    Active(ActiveSession),
}

impl SessionState {
    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            SessionState::Active(session) => Some(session),
            SessionState::NoSession => None,
        }
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut ActiveSession> {
        match self {
            SessionState::Active(session) => Some(session),
            SessionState::NoSession => None,
        }
    }

    pub fn active_recipe_id(&self) -> Option<&RecipeId> {
        self.active().map(ActiveSession::recipe_id)
    }

    pub fn phase(&self) -> SessionPhase {
        self.active()
            .map(|s| s.progress().phase())
            .unwrap_or(SessionPhase::Idle)
    }

    pub fn is_running(&self) -> bool {
        self.phase() == SessionPhase::Running
    }
}
