//! Recipe repository port.
//!
//! Supplies immutable `Recipe` records to the catalog handlers and the
//! session runtime. Every recipe it yields has at least one step and no
//! zero-length steps.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RecipeId};
use crate::domain::recipe::Recipe;

/// What an upsert stored.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// The recipe as persisted.
    pub recipe: Recipe,
    /// True if no recipe had this ID before.
    pub created: bool,
}

/// Repository port for the recipe catalog.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// All recipes, in stored order.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the store cannot be read
    async fn list(&self) -> Result<Vec<Recipe>, DomainError>;

    /// Find a recipe by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, DomainError>;

    /// Insert a new recipe or replace the one with the same ID.
    ///
    /// A replacement keeps the stored recipe's `created_at`. The lookup and
    /// the write happen as one step, so concurrent saves of one ID agree on
    /// which of them created it.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the recipe breaks a catalog rule
    /// - `StorageError` on persistence failure
    async fn upsert(&self, recipe: &Recipe) -> Result<UpsertOutcome, DomainError>;

    /// Delete a recipe.
    ///
    /// Returns `false` if no recipe had that ID.
    async fn delete(&self, id: &RecipeId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn RecipeRepository) {}
}
