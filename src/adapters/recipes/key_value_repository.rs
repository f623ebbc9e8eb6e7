//! Recipe repository backed by a key-value store.
//!
//! The whole catalog is one JSON array under `recipes:v1`. A store that has
//! never held the key is seeded with the demo catalog; a value that cannot
//! be parsed is treated as an empty catalog and left untouched until the
//! next write replaces it.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::foundation::{DomainError, ErrorCode, RecipeId};
use crate::domain::recipe::{demo_recipes, Recipe, RecipeDraft};
use crate::ports::{Clock, KeyValueStore, KeyValueStoreError, RecipeRepository, UpsertOutcome};

/// Storage key of the recipe catalog.
pub const RECIPES_KEY: &str = "recipes:v1";

fn storage_error(err: KeyValueStoreError) -> DomainError {
    DomainError::new(ErrorCode::StorageError, err.to_string())
}

/// `RecipeRepository` over any `KeyValueStore`.
pub struct KeyValueRecipeRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    // Serializes read-modify-write cycles on the single catalog key.
    write_lock: Mutex<()>,
}

impl KeyValueRecipeRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Parses a stored catalog, skipping entries that are not valid recipes.
    ///
    /// Returns `None` if the value is not a JSON array at all.
    fn parse_catalog(raw: &str) -> Option<Vec<Recipe>> {
        let entries: Vec<serde_json::Value> = match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    key = RECIPES_KEY,
                    error = %e,
                    "Stored catalog is unreadable, treating as empty"
                );
                return None;
            }
        };

        let recipes = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Recipe>(entry) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!(index, error = %e, "Skipping invalid stored recipe");
                    None
                }
            })
            .collect();
        Some(recipes)
    }

    async fn load(&self) -> Result<Vec<Recipe>, DomainError> {
        match self.store.get(RECIPES_KEY).await.map_err(storage_error)? {
            Some(raw) => Ok(Self::parse_catalog(&raw).unwrap_or_default()),
            None => {
                let demo = demo_recipes(self.clock.now())?;
                info!(count = demo.len(), "Seeding empty catalog with demo recipes");
                self.store_all(&demo).await?;
                Ok(demo)
            }
        }
    }

    async fn store_all(&self, recipes: &[Recipe]) -> Result<(), DomainError> {
        let json = serde_json::to_string(recipes)
            .map_err(|e| DomainError::new(ErrorCode::SerializationError, e.to_string()))?;
        self.store
            .set(RECIPES_KEY, &json)
            .await
            .map_err(storage_error)?;
        debug!(count = recipes.len(), "Catalog written");
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for KeyValueRecipeRepository {
    async fn list(&self) -> Result<Vec<Recipe>, DomainError> {
        let _guard = self.write_lock.lock().await;
        self.load().await
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, DomainError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.load().await?.into_iter().find(|r| r.id() == id))
    }

    async fn upsert(&self, recipe: &Recipe) -> Result<UpsertOutcome, DomainError> {
        let errors = RecipeDraft::from(recipe).validation_errors();
        if !errors.is_empty() {
            return Err(DomainError::new(ErrorCode::ValidationFailed, errors.join("; "))
                .with_detail("recipe_id", recipe.id().as_str()));
        }

        let _guard = self.write_lock.lock().await;
        let mut recipes = self.load().await?;
        let (stored, created) = match recipes.iter_mut().find(|r| r.id() == recipe.id()) {
            Some(existing) => {
                let replacement = recipe.clone().with_created_at(*existing.created_at());
                *existing = replacement.clone();
                (replacement, false)
            }
            None => {
                recipes.push(recipe.clone());
                (recipe.clone(), true)
            }
        };
        self.store_all(&recipes).await?;
        Ok(UpsertOutcome {
            recipe: stored,
            created,
        })
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut recipes = self.load().await?;
        let before = recipes.len();
        recipes.retain(|r| r.id() != id);
        if recipes.len() == before {
            return Ok(false);
        }
        self.store_all(&recipes).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::foundation::{IngredientId, Timestamp};
    use crate::domain::recipe::{Difficulty, DEMO_RECIPE_ID};

    fn repo_with(store: InMemoryKeyValueStore) -> KeyValueRecipeRepository {
        KeyValueRecipeRepository::new(
            Arc::new(store),
            Arc::new(ManualClock::new(Timestamp::from_unix_secs(1_000))),
        )
    }

    fn soup() -> Recipe {
        let water = IngredientId::new("water").unwrap();
        RecipeDraft::new("Soup", Difficulty::Easy)
            .with_ingredient(water.clone(), "Water", 1.0, "l")
            .with_instruction_step("Pour", 1, vec![water])
            .into_recipe(Timestamp::from_unix_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn empty_store_is_seeded_with_demo() {
        let store = InMemoryKeyValueStore::new();
        let repo = repo_with(store.clone());

        let recipes = repo.list().await.unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id().as_str(), DEMO_RECIPE_ID);
        assert_eq!(recipes[0].created_at(), &Timestamp::from_unix_secs(1_000));
        assert!(store.get(RECIPES_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn stored_empty_array_is_not_reseeded() {
        let repo = repo_with(InMemoryKeyValueStore::with_value(RECIPES_KEY, "[]"));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_value_reads_as_empty_without_seeding() {
        let store = InMemoryKeyValueStore::with_value(RECIPES_KEY, "{not json");
        let repo = repo_with(store.clone());

        assert!(repo.list().await.unwrap().is_empty());
        assert_eq!(
            store.get(RECIPES_KEY).await.unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn invalid_entries_are_skipped() {
        let valid = serde_json::to_value(soup()).unwrap();
        let raw = serde_json::json!([valid, { "id": "broken", "steps": [] }]).to_string();
        let repo = repo_with(InMemoryKeyValueStore::with_value(RECIPES_KEY, raw));

        let recipes = repo.list().await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title(), "Soup");
    }

    #[tokio::test]
    async fn upsert_inserts_then_replaces() {
        let repo = repo_with(InMemoryKeyValueStore::with_value(RECIPES_KEY, "[]"));
        let mut recipe = soup();

        assert!(repo.upsert(&recipe).await.unwrap().created);
        recipe.toggle_favorite();
        assert!(!repo.upsert(&recipe).await.unwrap().created);

        let stored = repo.find_by_id(recipe.id()).await.unwrap().unwrap();
        assert!(stored.is_favorite());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replacing_keeps_stored_created_at() {
        let repo = repo_with(InMemoryKeyValueStore::with_value(RECIPES_KEY, "[]"));
        let original = soup();
        repo.upsert(&original).await.unwrap();

        // Same ID built later, as a second writer would.
        let rebuilt: Recipe = {
            let mut value = serde_json::to_value(&original).unwrap();
            value["createdAt"] = serde_json::json!("2030-01-01T00:00:00Z");
            serde_json::from_value(value).unwrap()
        };
        let outcome = repo.upsert(&rebuilt).await.unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.recipe.created_at(), &Timestamp::from_unix_secs(5));
        let stored = repo.find_by_id(original.id()).await.unwrap().unwrap();
        assert_eq!(stored.created_at(), &Timestamp::from_unix_secs(5));
    }

    #[tokio::test]
    async fn concurrent_upserts_of_new_id_create_once() {
        let repo = Arc::new(repo_with(InMemoryKeyValueStore::with_value(RECIPES_KEY, "[]")));
        let recipe = soup();

        let (a, b) = tokio::join!(repo.upsert(&recipe), repo.upsert(&recipe));

        let created = [a.unwrap().created, b.unwrap().created];
        assert_eq!(created.iter().filter(|c| **c).count(), 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn upsert_rejects_out_of_range_settings() {
        let repo = repo_with(InMemoryKeyValueStore::with_value(RECIPES_KEY, "[]"));
        let demo = crate::domain::recipe::carbonara(Timestamp::now()).unwrap();
        let mut value = serde_json::to_value(demo).unwrap();
        value["steps"][0]["cookingSettings"]["speed"] = serde_json::json!(9);
        let recipe: Recipe = serde_json::from_value(value).unwrap();

        let err = repo.upsert(&recipe).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("Step 1: speed must be 1-5"));
    }

    #[tokio::test]
    async fn delete_reports_whether_recipe_existed() {
        let repo = repo_with(InMemoryKeyValueStore::new());
        let demo = RecipeId::new(DEMO_RECIPE_ID).unwrap();

        assert!(repo.delete(&demo).await.unwrap());
        assert!(!repo.delete(&demo).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown() {
        let repo = repo_with(InMemoryKeyValueStore::new());
        let missing = RecipeId::new("missing").unwrap();
        assert!(repo.find_by_id(&missing).await.unwrap().is_none());
    }
}
