//! AI recipe generation.
//!
//! # Process
//!
//! 1. Validate the request
//! 2. Build a prompt and ask the text generator for a JSON recipe
//! 3. Parse the reply (unparsable replies are returned under `raw`)
//! 4. Look up an illustration for the recipe name
//!
//! A text generation failure fails the request. An image search failure
//! only leaves `image` empty.

use serde_json::{Map, Value, json};

use crate::error::AppError;
use crate::models::fields::{self, value_text};
use crate::models::generation::GenerateRecipeRequest;
use crate::services::image_search::{ImageSearch, ImageSearchError};
use crate::services::text_generation::TextGenerator;

const IMAGE_RESULTS: u32 = 3;
const FALLBACK_IMAGE_QUERY: &str = "food dish";

/// Title keywords and the suffix they add to the image query, checked in order.
const QUERY_HINTS: [(&[&str], &str); 4] = [
    (&["dessert", "cake", "sweet"], "dessert food"),
    (&["soup", "broth"], "soup food"),
    (&["salad"], "salad food"),
    (&["pasta", "spaghetti"], "pasta food"),
];

pub async fn generate_recipe(
    generator: &dyn TextGenerator,
    images: &dyn ImageSearch,
    request: GenerateRecipeRequest,
) -> Result<Map<String, Value>, AppError> {
    let (ingredients, servings, intolerances) =
        match (request.ingredients, request.servings, request.intolerances) {
            (Some(i), Some(s), Some(t))
                if fields::is_truthy(&i) && fields::is_truthy(&s) && fields::is_truthy(&t) =>
            {
                (prompt_text(&i), prompt_text(&s), prompt_text(&t))
            }
            _ => {
                return Err(AppError::InvalidRequest(
                    "ingredients, servings and intolerances are required".to_string(),
                ));
            }
        };

    let prompt = build_prompt(&ingredients, &servings, &intolerances);
    let reply = generator.complete(&prompt).await?;
    let mut recipe = parse_reply(&reply);

    let image = match recipe.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => find_image(images, name).await,
        _ => String::new(),
    };
    recipe.insert("image".to_string(), Value::String(image));

    let name = recipe.get("name").and_then(Value::as_str).unwrap_or("<raw>");
    tracing::info!(name, "recipe generated");
    Ok(recipe)
}

/// Prompt asking for a single JSON recipe object.
pub fn build_prompt(ingredients: &str, servings: &str, intolerances: &str) -> String {
    format!(
        r#"Create a cooking recipe for {servings} people using the following ingredients: {ingredients}.
Respect the following intolerances: {intolerances}.
You are an API. Reply only with a valid JSON object, with no comments, no markdown and no surrounding text.
Use exactly this format:
{{
  "name": "Recipe name",
  "description": "Short description of the dish",
  "type": "Kind of dish (main course, dessert, starter, ...)",
  "servings": number of people,
  "ingredients": ["ingredient 1", "ingredient 2", ...],
  "instructions": ["step 1", "step 2", ...],
  "intolerances": ["intolerance 1", ...],
  "nutrition": {{
    "calories": number,
    "proteins": number,
    "carbohydrates": number,
    "fats": number
  }}
}}
Reply only with this JSON."#
    )
}

/// Prompt rendering of a request field: lists are joined with `, `.
fn prompt_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        other => value_text(other),
    }
}

/// Parse the generator's reply as a JSON object, or wrap it as `{"raw": reply}`.
pub fn parse_reply(reply: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(reply.trim()) {
        Ok(Value::Object(map)) => map,
        _ => {
            tracing::warn!("generator reply is not a JSON object, returning raw text");
            let mut map = Map::new();
            map.insert("raw".to_string(), json!(reply));
            map
        }
    }
}

/// Image query for a recipe title: a category hint, lower-cased, punctuation stripped.
pub fn image_query(title: &str) -> String {
    let lower = title.to_lowercase();
    let suffix = QUERY_HINTS
        .iter()
        .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
        .map(|(_, suffix)| *suffix)
        .unwrap_or(FALLBACK_IMAGE_QUERY);

    format!("{lower} {suffix}")
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First image URL for `title`, falling back to a generic food photo, or `""`.
async fn find_image(images: &dyn ImageSearch, title: &str) -> String {
    match try_find_image(images, title).await {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(error = %e, title, "image search failed");
            String::new()
        }
    }
}

async fn try_find_image(images: &dyn ImageSearch, title: &str) -> Result<String, ImageSearchError> {
    let query = image_query(title);
    tracing::debug!(%query, "searching image");

    if let Some(url) = images.search(&query, IMAGE_RESULTS).await?.into_iter().next() {
        return Ok(url);
    }

    Ok(images
        .search(FALLBACK_IMAGE_QUERY, 1)
        .await?
        .into_iter()
        .next()
        .unwrap_or_default())
}
