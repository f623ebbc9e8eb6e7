//! Demo catalog used to seed an empty store.

use super::aggregate::{CookingSettings, Difficulty, Ingredient, Recipe, RecipeStep, StepKind};
use crate::domain::foundation::{IngredientId, RecipeId, StepId, Timestamp, ValidationError};

/// Id of the seeded demo recipe.
pub const DEMO_RECIPE_ID: &str = "demo-1";

fn ingredient(
    id: &str,
    name: &str,
    quantity: f64,
    unit: &str,
) -> Result<Ingredient, ValidationError> {
    Ok(Ingredient {
        id: IngredientId::new(id)?,
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
    })
}

fn cooking(
    id: &str,
    description: &str,
    minutes: u32,
    temperature: i32,
    speed: i32,
) -> Result<RecipeStep, ValidationError> {
    Ok(RecipeStep {
        id: StepId::new(id)?,
        description: description.to_string(),
        duration_minutes: minutes,
        kind: StepKind::Cooking {
            settings: CookingSettings { temperature, speed },
        },
    })
}

fn instruction(
    id: &str,
    description: &str,
    minutes: u32,
    ingredients: &[&str],
) -> Result<RecipeStep, ValidationError> {
    Ok(RecipeStep {
        id: StepId::new(id)?,
        description: description.to_string(),
        duration_minutes: minutes,
        kind: StepKind::Instruction {
            ingredient_ids: ingredients
                .iter()
                .map(|i| IngredientId::new(*i))
                .collect::<Result<_, _>>()?,
        },
    })
}

/// "Simple Pasta Carbonara": five steps of 2, 8, 5, 2 and 3 minutes.
pub fn carbonara(now: Timestamp) -> Result<Recipe, ValidationError> {
    Recipe::reconstitute(
        RecipeId::new(DEMO_RECIPE_ID)?,
        "Simple Pasta Carbonara".to_string(),
        Some("Italian".to_string()),
        Difficulty::Medium,
        vec![
            ingredient("ing-1", "Spaghetti", 400.0, "g")?,
            ingredient("ing-2", "Eggs", 4.0, "pcs")?,
            ingredient("ing-3", "Parmesan", 100.0, "g")?,
            ingredient("ing-4", "Bacon", 200.0, "g")?,
        ],
        vec![
            cooking("step-1", "Boil water and add salt", 2, 100, 3)?,
            instruction("step-2", "Add spaghetti to boiling water", 8, &["ing-1"])?,
            cooking("step-3", "Fry bacon until crispy", 5, 180, 4)?,
            instruction(
                "step-4",
                "Mix eggs and parmesan cheese in a bowl",
                2,
                &["ing-2", "ing-3"],
            )?,
            instruction(
                "step-5",
                "Combine pasta with egg mixture and bacon",
                3,
                &["ing-1", "ing-2", "ing-3", "ing-4"],
            )?,
        ],
        false,
        now,
        now,
    )
}

/// Recipes written to a store that has never held a catalog.
pub fn demo_recipes(now: Timestamp) -> Result<Vec<Recipe>, ValidationError> {
    Ok(vec![carbonara(now)?])
}
