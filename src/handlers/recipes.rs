//! Recipe HTTP handlers.
//!
//! - GET /api/recipes - List recipes
//! - GET /api/recipe/{id} - Get one recipe
//! - POST /api/addRecipes - Create a recipe
//! - GET /api/searchRecipes - Keyword search
//! - GET /api/lowCaloriesRecipes - Recipes at or under 700 calories
//! - GET /api/highCaloriesRecipes - Recipes over 700 calories

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::recipe::{CalorieBand, CreateRecipeRequest, Recipe, RecipeEntry, SearchQuery, SortQuery},
    services::recipe_service,
    state::AppState,
};

/// List all recipes.
///
/// # Query
///
/// - `sort=newest` - most recent first
/// - `sort=oldest` - oldest first
/// - anything else - store order
///
/// # Response
///
/// - **200 OK**: array of recipes (may be empty)
/// - **500**: store unavailable
pub async fn list_recipes(
    State(state): State<AppState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let Query(query) = query?;
    let recipes = recipe_service::list_recipes(state.store.as_ref(), query.order()).await?;
    Ok(Json(recipes))
}

/// Get a recipe by its store id.
///
/// # Response
///
/// - **200 OK**: the recipe
/// - **404**: no recipe with that id
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = recipe_service::get_recipe(state.store.as_ref(), &id).await?;
    Ok(Json(recipe))
}

/// Create a recipe.
///
/// # Request Body
///
/// ```json
/// {
///   "Name": "Soup",
///   "Description": "hot",
///   "Ingredients": "water",
///   "Instructions": "boil",
///   "Servings": 2
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: `{ "id": "...", "fields": { ... } }`
/// - **400**: a required field is missing
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let created = recipe_service::create_recipe(state.store.as_ref(), request).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Search recipes by keyword.
///
/// Matches name, description, ingredients and instructions, ignoring case.
/// Each result carries `index`, its position in the oldest-first listing.
pub async fn search_recipes(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<RecipeEntry>>, AppError> {
    let Query(query) = query?;
    let entries = recipe_service::search_recipes(state.store.as_ref(), &query.keyword).await?;
    Ok(Json(entries))
}

/// Recipes with 700 calories or fewer (unreadable nutrition counts as 0).
pub async fn low_calorie_recipes(
    State(state): State<AppState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> Result<Json<Vec<RecipeEntry>>, AppError> {
    let Query(query) = query?;
    let entries =
        recipe_service::list_by_calories(state.store.as_ref(), CalorieBand::Low, query.order())
            .await?;
    Ok(Json(entries))
}

/// Recipes with more than 700 calories.
pub async fn high_calorie_recipes(
    State(state): State<AppState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> Result<Json<Vec<RecipeEntry>>, AppError> {
    let Query(query) = query?;
    let entries =
        recipe_service::list_by_calories(state.store.as_ref(), CalorieBand::High, query.order())
            .await?;
    Ok(Json(entries))
}
