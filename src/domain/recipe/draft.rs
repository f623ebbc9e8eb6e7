//! Recipe drafts as entered by the author, and their validation.
//!
//! A draft is deliberately loose: every field the authoring form can get
//! wrong is representable, so `validate` can report all problems at once
//! instead of stopping at the first one.

use serde::{Deserialize, Serialize};

use super::aggregate::{
    CookingSettings, Difficulty, Ingredient, Recipe, RecipeStep, StepKind, SPEED_RANGE,
    TEMPERATURE_RANGE,
};
use super::errors::RecipeError;
use crate::domain::foundation::{IngredientId, RecipeId, StepId, Timestamp};

/// Minimum number of characters in a recipe title.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Step type as chosen in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Cooking,
    #[default]
    Instruction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDraft {
    pub id: IngredientId,
    #[serde(default)]
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDraft {
    #[serde(default)]
    pub id: Option<StepId>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub step_type: StepType,
    pub duration_minutes: i64,
    #[serde(default)]
    pub cooking_settings: Option<CookingSettings>,
    #[serde(default)]
    pub ingredient_ids: Vec<IngredientId>,
}

/// A recipe as submitted for saving.
///
/// `id` is `None` for a brand new recipe and set when editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    #[serde(default)]
    pub id: Option<RecipeId>,
    pub title: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub ingredients: Vec<IngredientDraft>,
    #[serde(default)]
    pub steps: Vec<StepDraft>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl RecipeDraft {
    pub fn new(title: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            title: title.into(),
            difficulty,
            ..Default::default()
        }
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_id(mut self, id: RecipeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_ingredient(
        mut self,
        id: IngredientId,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        self.ingredients.push(IngredientDraft {
            id,
            name: name.into(),
            quantity,
            unit: unit.into(),
        });
        self
    }

    pub fn with_cooking_step(
        mut self,
        description: impl Into<String>,
        duration_minutes: i64,
        temperature: i32,
        speed: i32,
    ) -> Self {
        self.steps.push(StepDraft {
            id: None,
            description: description.into(),
            step_type: StepType::Cooking,
            duration_minutes,
            cooking_settings: Some(CookingSettings { temperature, speed }),
            ingredient_ids: Vec::new(),
        });
        self
    }

    pub fn with_instruction_step(
        mut self,
        description: impl Into<String>,
        duration_minutes: i64,
        ingredient_ids: Vec<IngredientId>,
    ) -> Self {
        self.steps.push(StepDraft {
            id: None,
            description: description.into(),
            step_type: StepType::Instruction,
            duration_minutes,
            cooking_settings: None,
            ingredient_ids,
        });
        self
    }

    /// Collects every validation message, in form order.
    ///
    /// Ingredient and step numbers in messages are 1-based.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errs = Vec::new();

        if self.title.chars().count() < MIN_TITLE_LENGTH {
            errs.push(format!(
                "Title must be at least {} characters",
                MIN_TITLE_LENGTH
            ));
        }
        if self.ingredients.is_empty() {
            errs.push("At least 1 ingredient required".to_string());
        }
        if self.steps.is_empty() {
            errs.push("At least 1 step required".to_string());
        }

        for (i, ing) in self.ingredients.iter().enumerate() {
            let n = i + 1;
            if ing.name.trim().is_empty() {
                errs.push(format!("Ingredient {}: name required", n));
            }
            if ing.quantity.is_nan() || ing.quantity <= 0.0 {
                errs.push(format!("Ingredient {}: quantity must be > 0", n));
            }
        }

        for (i, step) in self.steps.iter().enumerate() {
            let n = i + 1;
            if step.description.trim().is_empty() {
                errs.push(format!("Step {}: description required", n));
            }
            if step.duration_minutes <= 0 || step.duration_minutes > i64::from(u32::MAX) {
                errs.push(format!("Step {}: duration must be > 0", n));
            }
            match step.step_type {
                StepType::Cooking => match step.cooking_settings {
                    None => errs.push(format!("Step {}: cooking settings required", n)),
                    Some(settings) => {
                        let (t_min, t_max) = TEMPERATURE_RANGE;
                        if settings.temperature < t_min || settings.temperature > t_max {
                            errs.push(format!(
                                "Step {}: temperature must be {}-{}",
                                n, t_min, t_max
                            ));
                        }
                        let (s_min, s_max) = SPEED_RANGE;
                        if settings.speed < s_min || settings.speed > s_max {
                            errs.push(format!("Step {}: speed must be {}-{}", n, s_min, s_max));
                        }
                    }
                },
                StepType::Instruction => {
                    if step.ingredient_ids.is_empty() {
                        errs.push(format!("Step {}: at least 1 ingredient required", n));
                    }
                    for id in &step.ingredient_ids {
                        if !self.ingredients.iter().any(|ing| &ing.id == id) {
                            errs.push(format!("Step {}: unknown ingredient '{}'", n, id));
                        }
                    }
                }
            }
        }

        errs
    }

    /// Validates the draft and builds a recipe stamped with `now`.
    ///
    /// New drafts receive a generated id; step ids are generated when absent.
    ///
    /// # Errors
    ///
    /// - `RecipeError::Validation` listing every problem found
    pub fn into_recipe(self, now: Timestamp) -> Result<Recipe, RecipeError> {
        let errors = self.validation_errors();
        if !errors.is_empty() {
            return Err(RecipeError::Validation(errors));
        }

        let ingredients = self
            .ingredients
            .into_iter()
            .map(|i| Ingredient {
                id: i.id,
                name: i.name.trim().to_string(),
                quantity: i.quantity,
                unit: i.unit,
            })
            .collect();

        let steps = self
            .steps
            .into_iter()
            .map(|s| {
                let kind = match (s.step_type, s.cooking_settings) {
                    (StepType::Cooking, Some(settings)) => StepKind::Cooking { settings },
                    _ => StepKind::Instruction {
                        ingredient_ids: s.ingredient_ids,
                    },
                };
                RecipeStep {
                    id: s.id.unwrap_or_else(StepId::generate),
                    description: s.description.trim().to_string(),
                    // Range checked by validation_errors.
                    duration_minutes: s.duration_minutes as u32,
                    kind,
                }
            })
            .collect();

        let cuisine = self
            .cuisine
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let recipe = Recipe::reconstitute(
            self.id.unwrap_or_else(RecipeId::generate),
            self.title.trim().to_string(),
            cuisine,
            self.difficulty,
            ingredients,
            steps,
            self.is_favorite,
            now,
            now,
        )?;
        Ok(recipe)
    }
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        RecipeDraft {
            id: Some(recipe.id().clone()),
            title: recipe.title().to_string(),
            cuisine: recipe.cuisine().map(str::to_string),
            difficulty: recipe.difficulty(),
            ingredients: recipe
                .ingredients()
                .iter()
                .map(|i| IngredientDraft {
                    id: i.id.clone(),
                    name: i.name.clone(),
                    quantity: i.quantity,
                    unit: i.unit.clone(),
                })
                .collect(),
            steps: recipe
                .steps()
                .iter()
                .map(|s| {
                    let (step_type, cooking_settings, ingredient_ids) = match &s.kind {
                        StepKind::Cooking { settings } => {
                            (StepType::Cooking, Some(*settings), Vec::new())
                        }
                        StepKind::Instruction { ingredient_ids } => {
                            (StepType::Instruction, None, ingredient_ids.clone())
                        }
                    };
                    StepDraft {
                        id: Some(s.id.clone()),
                        description: s.description.clone(),
                        step_type,
                        duration_minutes: i64::from(s.duration_minutes),
                        cooking_settings,
                        ingredient_ids,
                    }
                })
                .collect(),
            is_favorite: recipe.is_favorite(),
        }
    }
}
