//! Application layer - Commands, Queries, Handlers and the session runtime.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Catalog changes go through command handlers; cooking goes through the
//! session runtime, which serializes every command and tick on one task.

pub mod cooking;
pub mod handlers;

pub use cooking::{SessionHandle, SessionRuntime};
pub use handlers::{
    DeleteRecipeCommand, DeleteRecipeHandler, GetRecipeHandler, GetRecipeQuery, ImportFormat,
    ImportRecipeCommand, ImportRecipeHandler, ListRecipesHandler, ListRecipesQuery,
    SaveRecipeCommand, SaveRecipeHandler, SaveRecipeResult, ToggleFavoriteCommand,
    ToggleFavoriteHandler,
};
