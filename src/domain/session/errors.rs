//! Cooking session error types.

use crate::domain::foundation::{DomainError, ErrorCode, RecipeId};
use crate::domain::recipe::RecipeError;

/// Cooking session errors.
///
/// Pausing, resuming, ending a step or ticking with no session are no-ops,
/// not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Another recipe already occupies the session slot.
    Conflict { active_recipe_id: RecipeId },
    /// The recipe to start does not exist.
    RecipeNotFound(RecipeId),
    /// The recipe could not be loaded.
    Repository(String),
    /// The session runtime has stopped.
    RuntimeUnavailable,
}

impl SessionError {
    pub fn conflict(active_recipe_id: RecipeId) -> Self {
        SessionError::Conflict { active_recipe_id }
    }
    pub fn recipe_not_found(id: RecipeId) -> Self {
        SessionError::RecipeNotFound(id)
    }
    pub fn repository(message: impl Into<String>) -> Self {
        SessionError::Repository(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Conflict { .. } => ErrorCode::SessionConflict,
            SessionError::RecipeNotFound(_) => ErrorCode::RecipeNotFound,
            SessionError::Repository(_) => ErrorCode::StorageError,
            SessionError::RuntimeUnavailable => ErrorCode::InternalError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::Conflict { active_recipe_id } => format!(
                "Another session is already active (recipe {})",
                active_recipe_id
            ),
            SessionError::RecipeNotFound(id) => format!("Recipe not found: {}", id),
            SessionError::Repository(msg) => format!("Could not load recipe: {}", msg),
            SessionError::RuntimeUnavailable => "Session runtime is not running".to_string(),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<RecipeError> for SessionError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::NotFound(id) => SessionError::RecipeNotFound(id),
            other => SessionError::Repository(other.to_string()),
        }
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        SessionError::Repository(err.to_string())
    }
}
