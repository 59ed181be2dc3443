//! AI recipe generation request.

use serde::Deserialize;
use serde_json::Value;

/// Request body for `POST /api/generate`.
///
/// Each field may be text, a number or a list. Empty lists are accepted,
/// which is what the web form sends when no intolerance is ticked.
///
/// ```json
/// { "ingredients": ["chicken", "rice"], "servings": 2, "intolerances": [] }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRecipeRequest {
    #[serde(default)]
    pub ingredients: Option<Value>,

    #[serde(default)]
    pub servings: Option<Value>,

    #[serde(default)]
    pub intolerances: Option<Value>,
}
