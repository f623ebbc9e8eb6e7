//! ToggleFavoriteHandler - Command handler for the favorite flag.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, RecipeId, SerializableDomainEvent};
use crate::domain::recipe::{RecipeError, RecipeFavoriteToggled};
use crate::ports::{Clock, EventPublisher, RecipeRepository};

/// Command to flip a recipe's favorite flag.
#[derive(Debug, Clone)]
pub struct ToggleFavoriteCommand {
    pub recipe_id: RecipeId,
}

/// Handler for toggling favorites.
///
/// Favoriting is not an edit, so `updated_at` is left alone.
pub struct ToggleFavoriteHandler {
    repository: Arc<dyn RecipeRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl ToggleFavoriteHandler {
    pub fn new(
        repository: Arc<dyn RecipeRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: ToggleFavoriteCommand,
        metadata: CommandMetadata,
    ) -> Result<RecipeFavoriteToggled, RecipeError> {
        let mut recipe = self
            .repository
            .find_by_id(&cmd.recipe_id)
            .await?
            .ok_or_else(|| RecipeError::not_found(cmd.recipe_id.clone()))?;

        let is_favorite = recipe.toggle_favorite();
        self.repository.upsert(&recipe).await?;

        let event = RecipeFavoriteToggled {
            event_id: EventId::new(),
            recipe_id: cmd.recipe_id,
            is_favorite,
            toggled_at: self.clock.now(),
        };
        self.event_publisher
            .publish(metadata.stamp(event.to_envelope()?))
            .await?;

        Ok(event)
    }
}
