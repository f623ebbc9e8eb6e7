//! Recipe domain module.
//!
//! User-authored recipes, the authoring draft with its validation rules,
//! and catalog listing.
//!
//! # Events
//!
//! - `RecipeSaved` - Published when a recipe is created or updated
//! - `RecipeDeleted` - Published when a recipe is removed
//! - `RecipeFavoriteToggled` - Published when the favorite flag flips

mod aggregate;
mod demo;
mod draft;
mod errors;
mod events;
mod query;

pub use aggregate::{
    CookingSettings, Difficulty, Ingredient, Recipe, RecipeRecord, RecipeStep, StepKind,
    SPEED_RANGE, TEMPERATURE_RANGE,
};
pub use demo::{carbonara, demo_recipes, DEMO_RECIPE_ID};
pub use draft::{IngredientDraft, RecipeDraft, StepDraft, StepType, MIN_TITLE_LENGTH};
pub use errors::RecipeError;
pub use events::{RecipeDeleted, RecipeFavoriteToggled, RecipeSaved};
pub use query::{RecipeQuery, SortOrder};
