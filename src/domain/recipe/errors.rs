//! Recipe-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, RecipeId, ValidationError};

/// Recipe catalog errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    /// The draft failed validation; one message per problem.
    Validation(Vec<String>),
    /// Recipe was not found.
    NotFound(RecipeId),
    /// The backing store failed.
    Storage(String),
    /// Stored or imported data could not be (de)serialized.
    Serialization(String),
}

impl RecipeError {
    pub fn validation(message: impl Into<String>) -> Self {
        RecipeError::Validation(vec![message.into()])
    }
    pub fn not_found(id: RecipeId) -> Self {
        RecipeError::NotFound(id)
    }
    pub fn storage(message: impl Into<String>) -> Self {
        RecipeError::Storage(message.into())
    }
    pub fn serialization(message: impl Into<String>) -> Self {
        RecipeError::Serialization(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            RecipeError::Validation(_) => ErrorCode::ValidationFailed,
            RecipeError::NotFound(_) => ErrorCode::RecipeNotFound,
            RecipeError::Storage(_) => ErrorCode::StorageError,
            RecipeError::Serialization(_) => ErrorCode::SerializationError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            RecipeError::Validation(errors) => {
                format!("Recipe is invalid: {}", errors.join("; "))
            }
            RecipeError::NotFound(id) => format!("Recipe not found: {}", id),
            RecipeError::Storage(msg) => format!("Storage error: {}", msg),
            RecipeError::Serialization(msg) => format!("Serialization error: {}", msg),
        }
    }
}

impl std::fmt::Display for RecipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RecipeError {}

impl From<ValidationError> for RecipeError {
    fn from(err: ValidationError) -> Self {
        RecipeError::Validation(vec![err.to_string()])
    }
}

impl From<DomainError> for RecipeError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => RecipeError::Validation(vec![err.message]),
            ErrorCode::SerializationError => RecipeError::Serialization(err.message),
            _ => RecipeError::Storage(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_joins_all_errors() {
        let err = RecipeError::Validation(vec![
            "Title must be at least 3 characters".to_string(),
            "At least 1 step required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Recipe is invalid: Title must be at least 3 characters; At least 1 step required"
        );
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn not_found_maps_to_recipe_not_found_code() {
        let err = RecipeError::not_found(RecipeId::new("r-9").unwrap());
        assert_eq!(err.code(), ErrorCode::RecipeNotFound);
        assert_eq!(err.to_string(), "Recipe not found: r-9");
    }

    #[test]
    fn domain_storage_error_becomes_storage() {
        let err: RecipeError = DomainError::new(ErrorCode::StorageError, "disk full").into();
        assert!(matches!(err, RecipeError::Storage(msg) if msg.contains("disk full")));
    }

    #[test]
    fn domain_serialization_error_keeps_message() {
        let err: RecipeError =
            DomainError::new(ErrorCode::SerializationError, "bad json").into();
        assert_eq!(err, RecipeError::Serialization("bad json".to_string()));
    }
}
