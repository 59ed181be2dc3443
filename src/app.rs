//! HTTP router.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Build the application router with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        // Public routes
        .route("/health", get(handlers::health::health_check))
        // Recipe routes
        .route("/api/recipes", get(handlers::recipes::list_recipes))
        .route("/api/recipe/{id}", get(handlers::recipes::get_recipe))
        .route("/api/addRecipes", post(handlers::recipes::create_recipe))
        .route("/api/searchRecipes", get(handlers::recipes::search_recipes))
        .route(
            "/api/lowCaloriesRecipes",
            get(handlers::recipes::low_calorie_recipes),
        )
        .route(
            "/api/highCaloriesRecipes",
            get(handlers::recipes::high_calorie_recipes),
        )
        .route("/api/generate", post(handlers::generate::generate_recipe))
        // Ingredient routes
        .route(
            "/api/ingredients",
            get(handlers::ingredients::list_ingredients),
        )
        .route(
            "/api/addIngredient",
            post(handlers::ingredients::create_ingredient),
        )
        // Contact form
        .route("/api/contacts", post(handlers::contacts::create_contact))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // Share the collaborators with all handlers via State extraction
        .with_state(state)
}
