//! Ingredient listing and creation.

use crate::error::AppError;
use crate::models::created::CreatedRecordResponse;
use crate::models::fields;
use crate::models::ingredient::{CreateIngredientRequest, Ingredient};
use crate::services::recipe_service::name_lookup;
use crate::store::{INGREDIENTS_TABLE, ListOptions, RECIPES_TABLE, RecordStore};

/// List ingredients with their linked recipes shown by name.
///
/// Recipes are fetched first to build the id → name table, then ingredients.
pub async fn list_ingredients(store: &dyn RecordStore) -> Result<Vec<Ingredient>, AppError> {
    let recipes = store.list(RECIPES_TABLE, ListOptions::default()).await?;
    let recipe_names = name_lookup(&recipes);

    let records = store.list(INGREDIENTS_TABLE, ListOptions::default()).await?;
    Ok(records
        .iter()
        .map(|r| Ingredient::from_record(r, &recipe_names))
        .collect())
}

/// Validate and create an ingredient. Only `Name` is required.
pub async fn create_ingredient(
    store: &dyn RecordStore,
    request: CreateIngredientRequest,
) -> Result<CreatedRecordResponse, AppError> {
    if fields::is_blank(request.name.as_deref()) {
        return Err(AppError::InvalidRequest("Name is required".to_string()));
    }

    let record = store
        .create(INGREDIENTS_TABLE, request.into_fields())
        .await?;
    Ok(record.into())
}
