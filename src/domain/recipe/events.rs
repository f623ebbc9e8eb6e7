//! Recipe catalog events.
//!
//! - `RecipeSaved` - Recipe created or updated
//! - `RecipeDeleted` - Recipe removed from the catalog
//! - `RecipeFavoriteToggled` - Favorite flag flipped

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, RecipeId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// RecipeSaved
// ════════════════════════════════════════════════════════════════════════════

/// Published when a recipe is created or replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSaved {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    pub title: String,
    /// True when the recipe did not exist before.
    pub created: bool,
    pub saved_at: Timestamp,
}

domain_event!(
    RecipeSaved,
    event_type = "recipe.saved.v1",
    aggregate_id = recipe_id,
    aggregate_type = "Recipe",
    occurred_at = saved_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// RecipeDeleted
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDeleted {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    pub deleted_at: Timestamp,
}

domain_event!(
    RecipeDeleted,
    event_type = "recipe.deleted.v1",
    aggregate_id = recipe_id,
    aggregate_type = "Recipe",
    occurred_at = deleted_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// RecipeFavoriteToggled
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeFavoriteToggled {
    pub event_id: EventId,
    pub recipe_id: RecipeId,
    /// Flag value after the toggle.
    pub is_favorite: bool,
    pub toggled_at: Timestamp,
}

domain_event!(
    RecipeFavoriteToggled,
    event_type = "recipe.favorite_toggled.v1",
    aggregate_id = recipe_id,
    aggregate_type = "Recipe",
    occurred_at = toggled_at,
    event_id = event_id
);
