//! Ingredient HTTP handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::ingredient::{CreateIngredientRequest, Ingredient},
    services::ingredient_service,
    state::AppState,
};

/// `GET /api/ingredients`
///
/// Linked recipes are returned by name; unknown links keep their id.
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let ingredients = ingredient_service::list_ingredients(state.store.as_ref()).await?;
    Ok(Json(ingredients))
}

/// `POST /api/addIngredient`
///
/// ```json
/// { "Name": "Basil", "Description": "Fresh leaves", "Recettes": [] }
/// ```
pub async fn create_ingredient(
    State(state): State<AppState>,
    payload: Result<Json<CreateIngredientRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let created = ingredient_service::create_ingredient(state.store.as_ref(), request).await?;

    Ok((StatusCode::CREATED, Json(created)))
}
