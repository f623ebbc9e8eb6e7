//! Recipe repository adapters.

mod key_value_repository;

pub use key_value_repository::{KeyValueRecipeRepository, RECIPES_KEY};
