//! ListRecipesHandler / GetRecipeHandler - Catalog queries.

use std::sync::Arc;

use crate::domain::foundation::RecipeId;
use crate::domain::recipe::{Recipe, RecipeError, RecipeQuery};
use crate::ports::RecipeRepository;

/// Query listing the catalog with filter and sort.
#[derive(Debug, Clone, Default)]
pub struct ListRecipesQuery {
    pub query: RecipeQuery,
}

/// Handler for listing recipes.
pub struct ListRecipesHandler {
    repository: Arc<dyn RecipeRepository>,
}

impl ListRecipesHandler {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListRecipesQuery) -> Result<Vec<Recipe>, RecipeError> {
        let recipes = self.repository.list().await?;
        Ok(query.query.apply(recipes))
    }
}

/// Query for one recipe.
#[derive(Debug, Clone)]
pub struct GetRecipeQuery {
    pub recipe_id: RecipeId,
}

/// Handler for retrieving a recipe by ID.
pub struct GetRecipeHandler {
    repository: Arc<dyn RecipeRepository>,
}

impl GetRecipeHandler {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetRecipeQuery) -> Result<Recipe, RecipeError> {
        self.repository
            .find_by_id(&query.recipe_id)
            .await?
            .ok_or_else(|| RecipeError::not_found(query.recipe_id))
    }
}
