//! Strongly-typed identifier value objects.
//!
//! Recipe data is authored by users and persisted as JSON, so identifiers
//! are opaque non-empty strings rather than UUIDs. Freshly created recipes
//! receive a UUID v4 string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Creates a new random identifier (UUID v4).
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// Unique identifier for a recipe.
    RecipeId,
    "recipe_id"
);

string_id!(
    /// Identifier of a step within a recipe.
    StepId,
    "step_id"
);

string_id!(
    /// Identifier of an ingredient within a recipe.
    IngredientId,
    "ingredient_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_id_rejects_empty_string() {
        assert!(RecipeId::new("").is_err());
        assert!(RecipeId::new("   ").is_err());
    }

    #[test]
    fn recipe_id_preserves_value() {
        let id = RecipeId::new("demo-1").unwrap();
        assert_eq!(id.as_str(), "demo-1");
        assert_eq!(id.to_string(), "demo-1");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(RecipeId::generate(), RecipeId::generate());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = StepId::new("step-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""step-1""#);
    }

    #[test]
    fn deserializing_empty_id_fails() {
        let result: Result<IngredientId, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }

    #[test]
    fn from_str_parses_id() {
        let id: RecipeId = "abc".parse().unwrap();
        assert_eq!(id.as_str(), "abc");
    }
}
