//! SaveRecipeHandler - Command handler for creating and updating recipes.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, SerializableDomainEvent};
use crate::domain::recipe::{Recipe, RecipeDraft, RecipeError, RecipeSaved};
use crate::ports::{Clock, EventPublisher, RecipeRepository, UpsertOutcome};

/// Command to save a recipe draft.
#[derive(Debug, Clone)]
pub struct SaveRecipeCommand {
    pub draft: RecipeDraft,
}

/// Result of a successful save.
#[derive(Debug, Clone)]
pub struct SaveRecipeResult {
    pub recipe: Recipe,
    /// True when no recipe with this ID existed before.
    pub created: bool,
    pub event: RecipeSaved,
}

/// Handler for saving recipes.
pub struct SaveRecipeHandler {
    repository: Arc<dyn RecipeRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl SaveRecipeHandler {
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
        cmd: SaveRecipeCommand,
        metadata: CommandMetadata,
    ) -> Result<SaveRecipeResult, RecipeError> {
        let now = self.clock.now();

        // 1. Validate and build
        let recipe = cmd.draft.into_recipe(now)?;

        // 2. Persist; a replacement keeps the stored creation time
        let UpsertOutcome { recipe, created } = self.repository.upsert(&recipe).await?;

        // 3. Publish event
        let event = RecipeSaved {
            event_id: EventId::new(),
            recipe_id: recipe.id().clone(),
            title: recipe.title().to_string(),
            created,
            saved_at: now,
        };
        self.event_publisher
            .publish(metadata.stamp(event.to_envelope()?))
            .await?;

        info!(recipe_id = %recipe.id(), created, "Recipe saved");
        Ok(SaveRecipeResult {
            recipe,
            created,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryEventBus, InMemoryKeyValueStore, KeyValueRecipeRepository, ManualClock,
        RECIPES_KEY,
    };
    use crate::domain::foundation::{IngredientId, RecipeId, Timestamp};
    use crate::domain::recipe::Difficulty;

    struct Fixture {
        handler: SaveRecipeHandler,
        repository: Arc<KeyValueRecipeRepository>,
        bus: Arc<InMemoryEventBus>,
        clock: Arc<ManualClock>,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(ManualClock::new(Timestamp::from_unix_secs(1_000)));
        let repository = Arc::new(KeyValueRecipeRepository::new(
            Arc::new(InMemoryKeyValueStore::with_value(RECIPES_KEY, "[]")),
            clock.clone(),
        ));
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = SaveRecipeHandler::new(repository.clone(), bus.clone(), clock.clone());
        Fixture {
            handler,
            repository,
            bus,
            clock,
        }
    }

    fn draft(title: &str) -> RecipeDraft {
        let rice = IngredientId::new("rice").unwrap();
        RecipeDraft::new(title, Difficulty::Medium)
            .with_ingredient(rice.clone(), "Rice", 300.0, "g")
            .with_cooking_step("Toast rice", 3, 160, 2)
            .with_instruction_step("Add stock", 15, vec![rice])
    }

    #[tokio::test]
    async fn new_draft_is_created_with_generated_id() {
        let f = fixture();

        let result = f
            .handler
            .handle(
                SaveRecipeCommand { draft: draft("Risotto") },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert!(result.created);
        assert_eq!(result.recipe.created_at(), &Timestamp::from_unix_secs(1_000));
        let stored = f.repository.find_by_id(result.recipe.id()).await.unwrap();
        assert_eq!(stored.unwrap().title(), "Risotto");

        let events = f.bus.events_of_type("recipe.saved.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].metadata.correlation_id.as_deref(),
            Some("test-correlation-id")
        );
    }

    #[tokio::test]
    async fn update_keeps_created_at_and_refreshes_updated_at() {
        let f = fixture();
        let first = f
            .handler
            .handle(
                SaveRecipeCommand { draft: draft("Risotto") },
                CommandMetadata::default(),
            )
            .await
            .unwrap();

        f.clock.advance_secs(60);
        let mut edited = RecipeDraft::from(&first.recipe);
        edited.title = "Mushroom Risotto".to_string();
        let second = f
            .handler
            .handle(SaveRecipeCommand { draft: edited }, CommandMetadata::default())
            .await
            .unwrap();

        assert!(!second.created);
        assert_eq!(second.recipe.id(), first.recipe.id());
        assert_eq!(second.recipe.created_at(), &Timestamp::from_unix_secs(1_000));
        assert_eq!(second.recipe.updated_at(), &Timestamp::from_unix_secs(1_060));
        assert_eq!(f.repository.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn draft_with_unknown_id_is_created_under_that_id() {
        let f = fixture();
        let id = RecipeId::new("imported-1").unwrap();

        let result = f
            .handler
            .handle(
                SaveRecipeCommand {
                    draft: draft("Pilaf").with_id(id.clone()),
                },
                CommandMetadata::default(),
            )
            .await
            .unwrap();

        assert!(result.created);
        assert_eq!(result.recipe.id(), &id);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_without_side_effects() {
        let f = fixture();

        let result = f
            .handler
            .handle(
                SaveRecipeCommand {
                    draft: RecipeDraft::new("No", Difficulty::Easy),
                },
                CommandMetadata::default(),
            )
            .await;

        assert!(matches!(result, Err(RecipeError::Validation(errors)) if errors.len() == 3));
        assert!(f.repository.list().await.unwrap().is_empty());
        assert_eq!(f.bus.event_count(), 0);
    }
}
