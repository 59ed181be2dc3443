//! AI recipe generation handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError, models::generation::GenerateRecipeRequest,
    services::generation_service, state::AppState,
};

/// Generate a recipe from ingredients, servings and intolerances.
///
/// # Response
///
/// - **201 Created**: the generated recipe with an `image` URL (possibly empty),
///   or `{ "raw": "...", "image": "" }` when the model did not answer in JSON
/// - **400**: a field is missing
/// - **500**: the text generation call failed
pub async fn generate_recipe(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRecipeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let recipe = generation_service::generate_recipe(
        state.generator.as_ref(),
        state.images.as_ref(),
        request,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}
