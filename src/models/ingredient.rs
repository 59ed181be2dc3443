//! Ingredient models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::{self, value_text};
use crate::store::Record;

/// A row of the `Ingredient` table with its linked recipes resolved to names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Description")]
    pub description: String,

    /// Recipe names (or raw ids when a link cannot be resolved)
    #[serde(rename = "Recettes")]
    pub recipes: Vec<String>,
}

impl Ingredient {
    /// Normalize an `Ingredient` row, mapping linked recipe ids through `recipe_names`.
    pub fn from_record(record: &Record, recipe_names: &HashMap<String, String>) -> Self {
        let recipes = match record.field("Recettes") {
            Some(Value::Array(ids)) => ids
                .iter()
                .map(value_text)
                .map(|id| recipe_names.get(&id).cloned().unwrap_or(id))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: record.id.clone(),
            name: fields::text(&record.fields, "Name"),
            description: fields::text(&record.fields, "Description"),
            recipes,
        }
    }
}

/// Request body for creating an ingredient.
///
/// ```json
/// { "Name": "Basil", "Description": "Fresh leaves", "Recettes": [] }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct CreateIngredientRequest {
    #[serde(rename = "Name", alias = "name", default)]
    pub name: Option<String>,

    #[serde(rename = "Description", alias = "description", default)]
    pub description: Option<String>,

    /// Linked recipe ids, may be empty
    #[serde(rename = "Recettes", alias = "recettes", alias = "recipes", default)]
    pub recipes: Vec<String>,
}

impl CreateIngredientRequest {
    pub fn into_fields(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("Name".into(), Value::String(self.name.unwrap_or_default()));
        map.insert(
            "Description".into(),
            Value::String(self.description.unwrap_or_default()),
        );
        map.insert(
            "Recettes".into(),
            Value::Array(self.recipes.into_iter().map(Value::String).collect()),
        );
        map
    }
}
