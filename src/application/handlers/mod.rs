//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod recipe;

pub use recipe::{
    DeleteRecipeCommand, DeleteRecipeHandler, GetRecipeHandler, GetRecipeQuery, ImportFormat,
    ImportRecipeCommand, ImportRecipeHandler, ListRecipesHandler, ListRecipesQuery,
    SaveRecipeCommand, SaveRecipeHandler, SaveRecipeResult, ToggleFavoriteCommand,
    ToggleFavoriteHandler,
};
