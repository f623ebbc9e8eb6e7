//! Recipe aggregate and its value objects.
//!
//! A `Recipe` that exists in memory always has at least one step and every
//! step lasts at least one minute. Deserialization enforces the same rules,
//! so the cooking session engine can index `steps[0]` without checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{IngredientId, RecipeId, StepId, Timestamp, ValidationError};

/// Inclusive temperature range accepted for cooking steps (degrees Celsius).
pub const TEMPERATURE_RANGE: (i32, i32) = (40, 200);

/// Inclusive speed range accepted for cooking steps.
pub const SPEED_RANGE: (i32, i32) = (1, 5);

/// How demanding a recipe is.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in display order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ValidationError::invalid_format(
                "difficulty",
                format!("unknown difficulty '{}'", other),
            )),
        }
    }
}

/// An ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// Appliance settings for a cooking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookingSettings {
    pub temperature: i32,
    pub speed: i32,
}

/// What a step asks of the cook.
///
/// Serialized with a `type` tag next to the step's other fields, so a
/// cooking step always carries `cookingSettings` and an instruction step
/// always carries `ingredientIds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepKind {
    Cooking {
        #[serde(rename = "cookingSettings")]
        settings: CookingSettings,
    },
    Instruction {
        #[serde(rename = "ingredientIds")]
        ingredient_ids: Vec<IngredientId>,
    },
}

impl StepKind {
    /// Short label used by listings ("cooking" / "instruction").
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Cooking { .. } => "cooking",
            StepKind::Instruction { .. } => "instruction",
        }
    }
}

/// One ordered step of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: StepId,
    pub description: String,
    pub duration_minutes: u32,
    #[serde(flatten)]
    pub kind: StepKind,
}

impl RecipeStep {
    /// Full duration of the step in seconds.
    pub fn duration_secs(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }
}

/// Serialized shape of a recipe, before invariants are checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    id: RecipeId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cuisine: Option<String>,
    difficulty: Difficulty,
    ingredients: Vec<Ingredient>,
    steps: Vec<RecipeStep>,
    #[serde(default)]
    is_favorite: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// A user-authored recipe.
///
/// # Invariants
///
/// - `steps` is non-empty
/// - every step has `duration_minutes > 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecipeRecord", into = "RecipeRecord")]
pub struct Recipe {
    id: RecipeId,
    title: String,
    cuisine: Option<String>,
    difficulty: Difficulty,
    ingredients: Vec<Ingredient>,
    steps: Vec<RecipeStep>,
    is_favorite: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Recipe {
    /// Reconstitute a recipe, checking the structural invariants.
    ///
    /// # Errors
    ///
    /// - `EmptyField("steps")` if there are no steps
    /// - `OutOfRange` if a step has a zero duration
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RecipeId,
        title: String,
        cuisine: Option<String>,
        difficulty: Difficulty,
        ingredients: Vec<Ingredient>,
        steps: Vec<RecipeStep>,
        is_favorite: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if steps.is_empty() {
            return Err(ValidationError::empty_field("steps"));
        }
        if let Some(step) = steps.iter().find(|s| s.duration_minutes == 0) {
            return Err(ValidationError::out_of_range(
                format!("steps[{}].durationMinutes", step.id),
                1,
                i32::MAX,
                0,
            ));
        }

        Ok(Self {
            id,
            title,
            cuisine,
            difficulty,
            ingredients,
            steps,
            is_favorite,
            created_at,
            updated_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &RecipeId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cuisine(&self) -> Option<&str> {
        self.cuisine.as_deref()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&RecipeStep> {
        self.steps.get(index)
    }

    /// The first step; always present.
    pub fn first_step(&self) -> &RecipeStep {
        &self.steps[0]
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Index of the final step.
    pub fn last_step_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Looks up an ingredient by id.
    pub fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| &i.id == id)
    }

    /// Sum of all step durations in minutes.
    pub fn total_minutes(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.duration_minutes)).sum()
    }

    /// Sum of all step durations in seconds.
    pub fn total_secs(&self) -> u64 {
        self.steps.iter().map(RecipeStep::duration_secs).sum()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Flips the favorite flag.
    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }

    /// Keeps the original creation time when replacing a stored recipe.
    pub(crate) fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }
}

impl TryFrom<RecipeRecord> for Recipe {
    type Error = ValidationError;

    fn try_from(r: RecipeRecord) -> Result<Self, Self::Error> {
        Recipe::reconstitute(
            r.id,
            r.title,
            r.cuisine,
            r.difficulty,
            r.ingredients,
            r.steps,
            r.is_favorite,
            r.created_at,
            r.updated_at,
        )
    }
}

impl From<Recipe> for RecipeRecord {
    fn from(r: Recipe) -> Self {
        RecipeRecord {
            id: r.id,
            title: r.title,
            cuisine: r.cuisine,
            difficulty: r.difficulty,
            ingredients: r.ingredients,
            steps: r.steps,
            is_favorite: r.is_favorite,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn step(id: &str, minutes: u32) -> RecipeStep {
        RecipeStep {
            id: StepId::new(id).unwrap(),
            description: format!("do {}", id),
            duration_minutes: minutes,
            kind: StepKind::Cooking {
                settings: CookingSettings {
                    temperature: 100,
                    speed: 2,
                },
            },
        }
    }

    fn recipe_with(steps: Vec<RecipeStep>) -> Result<Recipe, ValidationError> {
        Recipe::reconstitute(
            RecipeId::new("r-1").unwrap(),
            "Soup".to_string(),
            None,
            Difficulty::Easy,
            vec![],
            steps,
            false,
            Timestamp::from_unix_secs(0),
            Timestamp::from_unix_secs(0),
        )
    }

    #[test]
    fn reconstitute_rejects_recipe_without_steps() {
        assert!(matches!(
            recipe_with(vec![]),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn reconstitute_rejects_zero_duration_step() {
        let result = recipe_with(vec![step("a", 2), step("b", 0)]);
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn totals_sum_all_steps() {
        let recipe = recipe_with(vec![step("a", 2), step("b", 3)]).unwrap();
        assert_eq!(recipe.total_minutes(), 5);
        assert_eq!(recipe.total_secs(), 300);
        assert_eq!(recipe.last_step_index(), 1);
        assert_eq!(recipe.first_step().duration_secs(), 120);
    }

    #[test]
    fn toggle_favorite_flips_flag() {
        let mut recipe = recipe_with(vec![step("a", 1)]).unwrap();
        assert!(recipe.toggle_favorite());
        assert!(!recipe.toggle_favorite());
    }

    #[test]
    fn deserializes_camel_case_json() {
        let value = json!({
            "id": "demo-1",
            "title": "Pasta",
            "cuisine": "Italian",
            "difficulty": "Medium",
            "ingredients": [
                { "id": "ing-1", "name": "Spaghetti", "quantity": 400, "unit": "g" }
            ],
            "steps": [
                {
                    "id": "step-1",
                    "description": "Boil water",
                    "type": "cooking",
                    "durationMinutes": 2,
                    "cookingSettings": { "temperature": 100, "speed": 3 }
                },
                {
                    "id": "step-2",
                    "description": "Add spaghetti",
                    "type": "instruction",
                    "durationMinutes": 8,
                    "ingredientIds": ["ing-1"]
                }
            ],
            "isFavorite": true,
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T10:30:00Z"
        });

        let recipe: Recipe = serde_json::from_value(value).unwrap();
        assert_eq!(recipe.id().as_str(), "demo-1");
        assert_eq!(recipe.cuisine(), Some("Italian"));
        assert!(recipe.is_favorite());
        assert_eq!(recipe.step_count(), 2);
        assert!(matches!(
            recipe.steps()[0].kind,
            StepKind::Cooking { settings } if settings.temperature == 100
        ));
        assert!(matches!(
            &recipe.steps()[1].kind,
            StepKind::Instruction { ingredient_ids } if ingredient_ids.len() == 1
        ));
    }

    #[test]
    fn deserializing_recipe_without_steps_fails() {
        let value = json!({
            "id": "empty",
            "title": "Nothing",
            "difficulty": "Easy",
            "ingredients": [],
            "steps": [],
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T10:30:00Z"
        });

        assert!(serde_json::from_value::<Recipe>(value).is_err());
    }

    #[test]
    fn cooking_step_without_settings_fails_to_deserialize() {
        let value = json!({
            "id": "s",
            "description": "Fry",
            "type": "cooking",
            "durationMinutes": 5
        });

        assert!(serde_json::from_value::<RecipeStep>(value).is_err());
    }

    #[test]
    fn serialization_uses_original_field_names() {
        let recipe = recipe_with(vec![step("a", 1)]).unwrap();
        let value = serde_json::to_value(&recipe).unwrap();

        assert!(value.get("isFavorite").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("cuisine").is_none());
        assert_eq!(value["steps"][0]["type"], "cooking");
        assert_eq!(value["steps"][0]["durationMinutes"], 1);
        assert_eq!(value["steps"][0]["cookingSettings"]["speed"], 2);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("spicy".parse::<Difficulty>().is_err());
    }
}
