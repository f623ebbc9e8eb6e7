//! Catalog listing: difficulty filter and sort by total time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::aggregate::{Difficulty, Recipe};
use crate::domain::foundation::ValidationError;

/// Ordering by total cooking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ValidationError::invalid_format(
                "sort",
                format!("expected 'asc' or 'desc', got '{}'", other),
            )),
        }
    }
}

/// Filter and ordering for recipe listings.
///
/// An empty `difficulties` list matches every recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeQuery {
    pub difficulties: Vec<Difficulty>,
    pub sort: SortOrder,
    pub favorites_only: bool,
}

impl RecipeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the difficulty to the filter, or removes it if already present.
    pub fn toggle_difficulty(mut self, difficulty: Difficulty) -> Self {
        if let Some(pos) = self.difficulties.iter().position(|d| *d == difficulty) {
            self.difficulties.remove(pos);
        } else {
            self.difficulties.push(difficulty);
        }
        self
    }

    pub fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        (self.difficulties.is_empty() || self.difficulties.contains(&recipe.difficulty()))
            && (!self.favorites_only || recipe.is_favorite())
    }

    /// Filters then stably sorts by total minutes.
    pub fn apply(&self, recipes: Vec<Recipe>) -> Vec<Recipe> {
        let mut out: Vec<Recipe> = recipes.into_iter().filter(|r| self.matches(r)).collect();
        match self.sort {
            SortOrder::Asc => out.sort_by_key(|r| r.total_minutes()),
            SortOrder::Desc => out.sort_by_key(|r| std::cmp::Reverse(r.total_minutes())),
        }
        out
    }
}
