//! Recipe retrieval and creation.
//!
//! Reads always go to the store; nothing is cached between requests.

use std::collections::HashMap;

use crate::error::AppError;
use crate::models::created::CreatedRecordResponse;
use crate::models::fields;
use crate::models::recipe::{CalorieBand, CreateRecipeRequest, Recipe, RecipeEntry, SortOrder};
use crate::services::recipe_filters;
use crate::store::{INGREDIENTS_TABLE, ListOptions, RECIPES_TABLE, Record, RecordStore};

/// Fetch and normalize every recipe, optionally ordered by recency.
pub async fn list_recipes(
    store: &dyn RecordStore,
    order: Option<SortOrder>,
) -> Result<Vec<Recipe>, AppError> {
    let records = store
        .list(RECIPES_TABLE, SortOrder::list_options(order))
        .await?;
    let mut recipes: Vec<Recipe> = records.iter().map(Recipe::from_record).collect();

    resolve_ingredient_links(store, &mut recipes).await?;
    Ok(recipes)
}

/// Fetch one recipe, or `RecipeNotFound`.
pub async fn get_recipe(store: &dyn RecordStore, id: &str) -> Result<Recipe, AppError> {
    let record = store
        .find(RECIPES_TABLE, id)
        .await?
        .ok_or(AppError::RecipeNotFound)?;

    let mut recipe = Recipe::from_record(&record);
    resolve_ingredient_links(store, std::slice::from_mut(&mut recipe)).await?;
    Ok(recipe)
}

/// Keyword search over recipes fetched oldest-first.
pub async fn search_recipes(
    store: &dyn RecordStore,
    keyword: &str,
) -> Result<Vec<RecipeEntry>, AppError> {
    let recipes = list_recipes(store, Some(SortOrder::Oldest)).await?;
    Ok(recipe_filters::search(recipes, keyword))
}

/// Recipes on one side of the calorie threshold.
pub async fn list_by_calories(
    store: &dyn RecordStore,
    band: CalorieBand,
    order: Option<SortOrder>,
) -> Result<Vec<RecipeEntry>, AppError> {
    let recipes = list_recipes(store, order).await?;
    Ok(recipe_filters::by_calories(recipes, band))
}

/// Validate and create a recipe.
///
/// Validation happens before the store is contacted; an invalid request
/// causes no write.
pub async fn create_recipe(
    store: &dyn RecordStore,
    request: CreateRecipeRequest,
) -> Result<CreatedRecordResponse, AppError> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::InvalidRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let record = store.create(RECIPES_TABLE, request.into_fields()).await?;
    Ok(record.into())
}

/// Map record id to its `Name` field.
pub fn name_lookup(records: &[Record]) -> HashMap<String, String> {
    records
        .iter()
        .map(|r| (r.id.clone(), fields::text(&r.fields, "Name")))
        .collect()
}

/// Replace linked ingredient ids with ingredient names.
///
/// The ingredient table is only fetched when at least one recipe uses links.
async fn resolve_ingredient_links(
    store: &dyn RecordStore,
    recipes: &mut [Recipe],
) -> Result<(), AppError> {
    if !recipes.iter().any(|r| r.ingredients.is_linked()) {
        return Ok(());
    }

    let ingredients = store
        .list(INGREDIENTS_TABLE, ListOptions::default())
        .await?;
    let names = name_lookup(&ingredients);
    for recipe in recipes.iter_mut() {
        recipe.ingredients.resolve(&names);
    }
    Ok(())
}
