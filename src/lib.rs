//! Ingredient request validation and best-effort recipe retrieval.
//!
//! A [`UserRequest`] is validated with [`RequestValidator`], which parses every
//! free-text ingredient quantity. Its ingredient names then drive a
//! [`RecipeAggregator`], which locates candidate recipe URLs, fetches them
//! concurrently and parses JSON or HTML responses into [`RecipeRecord`]s.

pub mod aggregator;
pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetcher;
pub mod locator;
pub mod model;
pub mod quantity;
pub mod report;
pub mod validation;

pub use aggregator::{Aggregation, RecipeAggregator, SourceFailure};
pub use builder::RecipeAggregatorBuilder;
pub use config::{load_config, AppConfig};
pub use error::{ExtractError, FetchError, ParseError, RecipeError, SourceError, ValidationError};
pub use extractors::parse_recipe;
pub use fetcher::{ContentKind, RawContent, RecipeFetcher};
pub use locator::{QueryLocator, RecipeSourceLocator, StaticLocator};
pub use model::{
    Ingredient, IngredientQuantity, MealType, RecipeRecord, UserPreferences, UserRequest,
    UNKNOWN_RECIPE_NAME,
};
pub use quantity::parse_quantity;
pub use report::{EventReporter, LogReporter};
pub use validation::{validate_user_request, FieldRule, RequestValidator};

use log::info;

/// Result of a recipe search: the validated request echo and the recipes found
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RecipeSearch {
    pub request: UserRequest,
    pub recipes: Vec<RecipeRecord>,
}

/// Validate a request and gather recipes for its ingredients
///
/// Uses the configuration from [`load_config`]. An empty `recipes` list is a
/// successful search that found nothing; callers decide whether that is an error.
///
/// # Errors
/// * [`RecipeError::Validation`] if the request is rejected
/// * [`RecipeError::Config`] if configuration cannot be loaded
pub async fn find_recipes(request: UserRequest) -> Result<RecipeSearch, RecipeError> {
    let config = load_config()?;
    find_recipes_with_config(request, &config).await
}

/// Like [`find_recipes`], with explicit configuration
pub async fn find_recipes_with_config(
    request: UserRequest,
    config: &AppConfig,
) -> Result<RecipeSearch, RecipeError> {
    let request = validate_user_request(request)?;
    let aggregator = RecipeAggregator::from_config(config)?;

    let names = request.ingredient_names();
    info!("Searching recipes for {} ingredients", names.len());
    let recipes = aggregator.aggregate(&names).await;

    Ok(RecipeSearch { request, recipes })
}
