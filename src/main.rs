//! # recipe-session
//!
//! Command-line front end for the recipe catalog and the cooking session.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! recipe-session list --difficulty medium --sort desc
//!
//! # Cook a recipe: p = pause, r = resume, n = next step, q = quit
//! recipe-session cook demo-1
//!
//! # Add a recipe from a YAML or JSON document
//! recipe-session import shakshuka.yaml
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use recipe_session::adapters::{
    FileKeyValueStore, InMemoryKeyValueStore, IntervalTickSource, KeyValueRecipeRepository,
    SystemClock, TracingEventPublisher,
};
use recipe_session::application::{
    DeleteRecipeCommand, DeleteRecipeHandler, GetRecipeHandler, GetRecipeQuery, ImportFormat,
    ImportRecipeCommand, ImportRecipeHandler, ListRecipesHandler, ListRecipesQuery,
    SaveRecipeHandler, SessionHandle, SessionRuntime, ToggleFavoriteCommand,
    ToggleFavoriteHandler,
};
use recipe_session::config::{AppConfig, LoggingConfig, StorageBackend};
use recipe_session::domain::foundation::{CommandMetadata, RecipeId};
use recipe_session::domain::recipe::{Difficulty, Recipe, RecipeQuery, SortOrder, StepKind};
use recipe_session::domain::session::{
    format_clock, format_compact_clock, SessionState, SessionView,
};
use recipe_session::ports::{Clock, EventPublisher, KeyValueStore, RecipeRepository};

/// Recipe catalog and drift-corrected cooking timer
#[derive(Parser, Debug)]
#[command(name = "recipe-session")]
#[command(version)]
#[command(about = "Recipe catalog with a step-by-step cooking countdown")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List recipes, optionally filtered and sorted by total time
    List {
        /// Only show these difficulties (repeatable)
        #[arg(short, long = "difficulty", action = clap::ArgAction::Append)]
        difficulties: Vec<Difficulty>,

        /// Sort by total minutes
        #[arg(short, long, default_value = "asc")]
        sort: SortOrder,

        /// Only show favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// Show a recipe with its ingredients and steps
    Show { recipe_id: RecipeId },
    /// Cook a recipe interactively
    Cook { recipe_id: RecipeId },
    /// Toggle a recipe's favorite flag
    Favorite { recipe_id: RecipeId },
    /// Delete a recipe
    Delete { recipe_id: RecipeId },
    /// Import a recipe document
    Import {
        file: PathBuf,

        /// Document format; guessed from the extension when omitted
        #[arg(long)]
        format: Option<ImportFormat>,
    },
}

/// Ports shared by every command.
struct Services {
    repository: Arc<dyn RecipeRepository>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl Services {
    fn from_config(config: &AppConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => Arc::new(FileKeyValueStore::new(&config.storage.data_dir)),
            StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
        };
        debug!(
            backend = ?config.storage.backend,
            data_dir = %config.storage.data_dir.display(),
            "Storage ready"
        );

        Self {
            repository: Arc::new(KeyValueRecipeRepository::new(store, clock.clone())),
            publisher: Arc::new(TracingEventPublisher::new()),
            clock,
        }
    }

    fn save_handler(&self) -> SaveRecipeHandler {
        SaveRecipeHandler::new(
            self.repository.clone(),
            self.publisher.clone(),
            self.clock.clone(),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    setup_tracing(&config.logging)?;

    let services = Services::from_config(&config);
    let metadata = CommandMetadata::new().with_source("cli");

    match args.command {
        Command::List {
            difficulties,
            sort,
            favorites,
        } => {
            let mut query = difficulties
                .into_iter()
                .fold(RecipeQuery::new(), RecipeQuery::toggle_difficulty)
                .sorted(sort);
            if favorites {
                query = query.favorites_only();
            }
            let recipes = ListRecipesHandler::new(services.repository.clone())
                .handle(ListRecipesQuery { query })
                .await?;
            print_catalog(&recipes);
        }
        Command::Show { recipe_id } => {
            let recipe = GetRecipeHandler::new(services.repository.clone())
                .handle(GetRecipeQuery { recipe_id })
                .await?;
            print_recipe(&recipe);
        }
        Command::Cook { recipe_id } => {
            let runtime = SessionRuntime::new(
                services.repository.clone(),
                services.publisher.clone(),
                services.clock.clone(),
                Arc::new(IntervalTickSource::new(services.clock.clone())),
            );
            cook(runtime.spawn(), recipe_id).await?;
        }
        Command::Favorite { recipe_id } => {
            let event = ToggleFavoriteHandler::new(
                services.repository.clone(),
                services.publisher.clone(),
                services.clock.clone(),
            )
            .handle(ToggleFavoriteCommand { recipe_id }, metadata)
            .await?;
            let mark = if event.is_favorite { "now" } else { "no longer" };
            println!("{} is {} a favorite", event.recipe_id, mark);
        }
        Command::Delete { recipe_id } => {
            let event = DeleteRecipeHandler::new(
                services.repository.clone(),
                services.publisher.clone(),
                services.clock.clone(),
            )
            .handle(DeleteRecipeCommand { recipe_id }, metadata)
            .await?;
            println!("Deleted {}", event.recipe_id);
        }
        Command::Import { file, format } => {
            let document = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let format = format.unwrap_or_else(|| ImportFormat::from_path(&file));
            let result = ImportRecipeHandler::new(services.save_handler())
                .handle(ImportRecipeCommand { document, format }, metadata)
                .await?;
            let verb = if result.created { "Imported" } else { "Updated" };
            println!("{} {} ({})", verb, result.recipe.title(), result.recipe.id());
        }
    }

    Ok(())
}

/// Setup tracing subscriber from the logging configuration.
///
/// Logs go to stderr so the cooking display on stdout stays readable.
fn setup_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = logging.env_filter()?;

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn print_catalog(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes match.");
        return;
    }
    for recipe in recipes {
        let star = if recipe.is_favorite() { "*" } else { " " };
        println!(
            "{} {:<24} {:<40} {:<6} {:>4} min  {} steps",
            star,
            recipe.id(),
            recipe.title(),
            recipe.difficulty(),
            recipe.total_minutes(),
            recipe.step_count()
        );
    }
}

fn print_recipe(recipe: &Recipe) {
    println!("{} [{}]", recipe.title(), recipe.id());
    if let Some(cuisine) = recipe.cuisine() {
        println!("Cuisine: {}", cuisine);
    }
    println!(
        "Difficulty: {}  Total: {} min",
        recipe.difficulty(),
        recipe.total_minutes()
    );

    println!("\nIngredients:");
    for ingredient in recipe.ingredients() {
        println!(
            "  - {} {} {}",
            ingredient.quantity, ingredient.unit, ingredient.name
        );
    }

    println!("\nSteps:");
    for (i, step) in recipe.steps().iter().enumerate() {
        let detail = match &step.kind {
            StepKind::Cooking { settings } => {
                format!("{}°C, speed {}", settings.temperature, settings.speed)
            }
            StepKind::Instruction { ingredient_ids } => ingredient_ids
                .iter()
                .filter_map(|id| recipe.ingredient(id).map(|ing| ing.name.as_str()))
                .collect::<Vec<_>>()
                .join(", "),
        };
        println!(
            "  {}. {} ({} min, {}) {}",
            i + 1,
            step.description,
            step.duration_minutes,
            step.kind.label(),
            detail
        );
    }
}

fn render(view: &SessionView) {
    println!(
        "[{}] Step {}/{}: {}  step {} ({})  overall {} ({})",
        view.phase,
        view.step_number,
        view.step_count,
        view.step_description,
        view.step_clock(),
        view.step_progress,
        view.overall_clock(),
        view.overall_progress
    );
}

/// Runs one cooking session until it finishes or the user quits.
async fn cook(session: SessionHandle, recipe_id: RecipeId) -> Result<()> {
    let mut updates = session.subscribe();
    let started = session.start(recipe_id).await?;
    let Some(view) = SessionView::of_state(&started) else {
        bail!("Session ended before it started");
    };
    println!(
        "Cooking {} ({} left). Commands: p = pause, r = resume, n = next step, q = quit",
        view.recipe_title,
        format_clock(view.overall_remaining_secs)
    );
    render(&view);
    updates.borrow_and_update();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                match SessionView::of_state(&state) {
                    Some(view) => render(&view),
                    None => {
                        println!("Done. Enjoy your meal!");
                        break;
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match line.trim() {
                    "p" => {
                        session.pause().await?;
                    }
                    "r" => {
                        session.resume().await?;
                    }
                    "n" => {
                        session.end_step().await?;
                    }
                    "q" => break,
                    "" => {}
                    other => println!("Unknown command '{}'", other),
                }
            }
        }
    }

    if let SessionState::Active(active) = session.snapshot().await? {
        let left = format_compact_clock(active.progress().overall_remaining_secs);
        println!("Stopped with {} to go.", left);
        info!(recipe_id = %active.recipe_id(), "Leaving session unfinished");
    }
    session.shutdown().await?;
    Ok(())
}
