//! ImportRecipeHandler - Saves a recipe authored as a JSON or YAML document.

use std::path::Path;
use std::str::FromStr;

use crate::domain::foundation::CommandMetadata;
use crate::domain::recipe::{RecipeDraft, RecipeError};

use super::save_recipe::{SaveRecipeCommand, SaveRecipeHandler, SaveRecipeResult};

/// Document format of an imported recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Yaml,
}

impl ImportFormat {
    /// Guesses the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ImportFormat::Yaml
            }
            _ => ImportFormat::Json,
        }
    }

    /// Parses a document into a draft.
    pub fn parse(self, document: &str) -> Result<RecipeDraft, RecipeError> {
        match self {
            ImportFormat::Json => Ok(serde_json::from_str(document)?),
            ImportFormat::Yaml => serde_yaml::from_str(document)
                .map_err(|e| RecipeError::serialization(e.to_string())),
        }
    }
}

impl FromStr for ImportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ImportFormat::Json),
            "yaml" | "yml" => Ok(ImportFormat::Yaml),
            other => Err(format!("unknown import format '{}'", other)),
        }
    }
}

/// Command to import a recipe document.
#[derive(Debug, Clone)]
pub struct ImportRecipeCommand {
    pub document: String,
    pub format: ImportFormat,
}

/// Handler for importing recipes.
///
/// Parsing is the only step of its own; validation, persistence and the
/// `RecipeSaved` event are those of a normal save.
pub struct ImportRecipeHandler {
    save: SaveRecipeHandler,
}

impl ImportRecipeHandler {
    pub fn new(save: SaveRecipeHandler) -> Self {
        Self { save }
    }

    pub async fn handle(
        &self,
        cmd: ImportRecipeCommand,
        metadata: CommandMetadata,
    ) -> Result<SaveRecipeResult, RecipeError> {
        let draft = cmd.format.parse(&cmd.document)?;
        self.save
            .handle(SaveRecipeCommand { draft }, metadata)
            .await
    }
}
