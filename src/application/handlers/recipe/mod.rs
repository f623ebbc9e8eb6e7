//! Recipe catalog command and query handlers.

mod delete_recipe;
mod import_recipe;
mod list_recipes;
mod save_recipe;
mod toggle_favorite;

pub use delete_recipe::{DeleteRecipeCommand, DeleteRecipeHandler};
pub use import_recipe::{ImportFormat, ImportRecipeCommand, ImportRecipeHandler};
pub use list_recipes::{GetRecipeHandler, GetRecipeQuery, ListRecipesHandler, ListRecipesQuery};
pub use save_recipe::{SaveRecipeCommand, SaveRecipeHandler, SaveRecipeResult};
pub use toggle_favorite::{ToggleFavoriteCommand, ToggleFavoriteHandler};
