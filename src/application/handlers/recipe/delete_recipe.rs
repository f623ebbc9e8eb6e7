//! DeleteRecipeHandler - Command handler for removing recipes.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, RecipeId, SerializableDomainEvent};
use crate::domain::recipe::{RecipeDeleted, RecipeError};
use crate::ports::{Clock, EventPublisher, RecipeRepository};

/// Command to delete a recipe.
#[derive(Debug, Clone)]
pub struct DeleteRecipeCommand {
    pub recipe_id: RecipeId,
}

/// Handler for deleting recipes.
pub struct DeleteRecipeHandler {
    repository: Arc<dyn RecipeRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl DeleteRecipeHandler {
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
        cmd: DeleteRecipeCommand,
        metadata: CommandMetadata,
    ) -> Result<RecipeDeleted, RecipeError> {
        if !self.repository.delete(&cmd.recipe_id).await? {
            return Err(RecipeError::not_found(cmd.recipe_id));
        }

        let event = RecipeDeleted {
            event_id: EventId::new(),
            recipe_id: cmd.recipe_id,
            deleted_at: self.clock.now(),
        };
        self.event_publisher
            .publish(metadata.stamp(event.to_envelope()?))
            .await?;

        info!(recipe_id = %event.recipe_id, "Recipe deleted");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryEventBus, InMemoryKeyValueStore, KeyValueRecipeRepository, ManualClock,
    };
    use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
    use crate::domain::recipe::{Recipe, DEMO_RECIPE_ID};
    use crate::ports::UpsertOutcome;
    use async_trait::async_trait;

    fn handler_with(
        repository: Arc<dyn RecipeRepository>,
        bus: Arc<InMemoryEventBus>,
    ) -> DeleteRecipeHandler {
        DeleteRecipeHandler::new(
            repository,
            bus,
            Arc::new(ManualClock::new(Timestamp::from_unix_secs(50))),
        )
    }

    fn seeded_repository() -> Arc<KeyValueRecipeRepository> {
        Arc::new(KeyValueRecipeRepository::new(
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(ManualClock::new(Timestamp::from_unix_secs(0))),
        ))
    }

    #[tokio::test]
    async fn deletes_existing_recipe_and_publishes() {
        let repository = seeded_repository();
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = handler_with(repository.clone(), bus.clone());
        let id = RecipeId::new(DEMO_RECIPE_ID).unwrap();

        let event = handler
            .handle(DeleteRecipeCommand { recipe_id: id.clone() }, CommandMetadata::default())
            .await
            .unwrap();

        assert_eq!(event.recipe_id, id);
        assert_eq!(event.deleted_at, Timestamp::from_unix_secs(50));
        assert!(repository.find_by_id(&id).await.unwrap().is_none());
        assert!(bus.has_event("recipe.deleted.v1"));
    }

    #[tokio::test]
    async fn unknown_recipe_is_not_found() {
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = handler_with(seeded_repository(), bus.clone());
        let id = RecipeId::new("nope").unwrap();

        let result = handler
            .handle(DeleteRecipeCommand { recipe_id: id.clone() }, CommandMetadata::default())
            .await;

        assert_eq!(result.unwrap_err(), RecipeError::NotFound(id));
        assert_eq!(bus.event_count(), 0);
    }

    struct FailingRepository;

    #[async_trait]
    impl RecipeRepository for FailingRepository {
        async fn list(&self) -> Result<Vec<Recipe>, DomainError> {
            Ok(vec![])
        }
        async fn find_by_id(&self, _: &RecipeId) -> Result<Option<Recipe>, DomainError> {
            Ok(None)
        }
        async fn upsert(&self, recipe: &Recipe) -> Result<UpsertOutcome, DomainError> {
            Ok(UpsertOutcome {
                recipe: recipe.clone(),
                created: true,
            })
        }
        async fn delete(&self, _: &RecipeId) -> Result<bool, DomainError> {
            Err(DomainError::new(ErrorCode::StorageError, "Simulated delete failure"))
        }
    }

    #[tokio::test]
    async fn storage_failure_is_propagated() {
        let handler = handler_with(Arc::new(FailingRepository), Arc::new(InMemoryEventBus::new()));

        let result = handler
            .handle(
                DeleteRecipeCommand {
                    recipe_id: RecipeId::new("x").unwrap(),
                },
                CommandMetadata::default(),
            )
            .await;

        assert!(matches!(result, Err(RecipeError::Storage(msg)) if msg.contains("Simulated")));
    }
}
