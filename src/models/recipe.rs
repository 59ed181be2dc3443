//! Recipe data models and their normalization from store records.
//!
//! This module defines:
//! - `Recipe`: a normalized row of the `Recipes` table
//! - `RecipeEntry`: a recipe annotated with its fetch position (and calories)
//! - `CreateRecipeRequest`: request body for creating recipes
//! - the derived display fields (rating, calories, image URL)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::{self, value_text};
use crate::store::{CREATED_AT_FIELD, Direction, ListOptions, Record};

/// Recipes at or under this many calories are "low calorie".
pub const LOW_CALORIE_MAX: f64 = 700.0;

/// A recipe as returned to clients.
///
/// Field names follow the store's column names.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "recA1b2C3",
///   "Name": "Tomato Soup",
///   "Description": "Warm and simple",
///   "Type": "Starter",
///   "Servings": 4,
///   "Ingredients": "tomatoes, onion, stock",
///   "Instructions": "Simmer and blend",
///   "Allergies": "",
///   "NutritionAnalysis": "{\"calories\": 320}",
///   "Image": "https://images.example/soup.jpg",
///   "CreatedAt": "2025-03-02T10:00:00.000Z",
///   "Rating": 4.2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Type")]
    pub kind: String,

    /// Number or free text, `""` when absent
    #[serde(rename = "Servings")]
    pub servings: Value,

    #[serde(rename = "Ingredients")]
    pub ingredients: RecipeIngredients,

    #[serde(rename = "Instructions")]
    pub instructions: String,

    #[serde(rename = "Allergies")]
    pub allergies: String,

    /// JSON-encoded nutrition object, passed through untouched
    #[serde(rename = "NutritionAnalysis")]
    pub nutrition_analysis: Value,

    /// First image URL, if any
    #[serde(rename = "Image")]
    pub image: Option<String>,

    #[serde(rename = "CreatedAt")]
    pub created_at: String,

    /// Derived from `id`, never stored
    #[serde(rename = "Rating")]
    pub rating: f64,
}

impl Recipe {
    /// Normalize a `Recipes` row: fill defaults, resolve the image, attach the rating.
    pub fn from_record(record: &Record) -> Self {
        let f = &record.fields;

        let created_at = match fields::text(f, CREATED_AT_FIELD) {
            s if s.is_empty() => record.created_time.clone().unwrap_or_default(),
            s => s,
        };

        Self {
            id: record.id.clone(),
            name: fields::text(f, "Name"),
            description: fields::text(f, "Description"),
            kind: fields::text(f, "Type"),
            servings: fields::value_or_empty(f, "Servings"),
            ingredients: RecipeIngredients::from_field(f.get("Ingredients")),
            instructions: fields::text(f, "Instructions"),
            allergies: fields::text(f, "Allergies"),
            nutrition_analysis: fields::value_or_empty(f, "NutritionAnalysis"),
            image: RecipeImage::from_field(f.get("Image")).and_then(RecipeImage::into_display_url),
            created_at,
            rating: rating(&record.id),
        }
    }

    /// Calories declared in the nutrition analysis, 0 when unparsable.
    pub fn calories(&self) -> f64 {
        parse_calories(&self.nutrition_analysis)
    }

    /// Case-insensitive substring test over name, description, ingredients and instructions.
    ///
    /// `keyword` must already be lower-cased.
    pub fn matches(&self, keyword: &str) -> bool {
        format!(
            "{} {} {} {}",
            self.name,
            self.description,
            self.ingredients.search_text(),
            self.instructions
        )
        .to_lowercase()
        .contains(keyword)
    }
}

/// Deterministic pseudo-rating in [3.0, 5.0] with one decimal.
///
/// The seed is the sum of the UTF-16 code units of the id.
pub fn rating(id: &str) -> f64 {
    let seed: u64 = id.encode_utf16().map(u64::from).sum();
    let raw = (seed % 21) as f64 / 10.0 + 3.0;
    (raw * 10.0).round() / 10.0
}

/// Read `calories` out of a nutrition analysis.
///
/// The analysis is usually a JSON string but may already be an object.
/// Anything that does not yield a finite number counts as 0.
pub fn parse_calories(nutrition: &Value) -> f64 {
    let parsed = match nutrition {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(v) => v,
            Err(_) => return 0.0,
        },
        other => other.clone(),
    };

    let calories = match parsed.get("calories") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_leading_float(s),
        _ => 0.0,
    };

    if calories.is_finite() { calories } else { 0.0 }
}

/// Parse the longest numeric prefix of `s` ("350 kcal" -> 350.0), 0 if none.
fn parse_leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let is_digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut digits = 0;
    while is_digit(end) {
        end += 1;
        digits += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while is_digit(end) {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_start = exp_end;
        while is_digit(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// The `Ingredients` column: free text, or links to `Ingredient` rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecipeIngredients {
    Text(String),
    Linked(Vec<String>),
}

impl RecipeIngredients {
    fn from_field(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) => Self::Linked(items.iter().map(value_text).collect()),
            Some(other) => Self::Text(value_text(other)),
            None => Self::Text(String::new()),
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self, Self::Linked(_))
    }

    /// Replace linked ids with names; ids missing from `names` are kept.
    pub fn resolve(&mut self, names: &HashMap<String, String>) {
        if let Self::Linked(ids) = self {
            for id in ids.iter_mut() {
                if let Some(name) = names.get(id.as_str()) {
                    *id = name.clone();
                }
            }
        }
    }

    pub fn search_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Linked(items) => items.join(", "),
        }
    }
}

/// The `Image` column: a bare URL or a list of attachments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecipeImage {
    SingleUrl(String),
    UrlList(Vec<ImageAttachment>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageAttachment {
    pub url: String,
}

impl RecipeImage {
    fn from_field(value: Option<&Value>) -> Option<Self> {
        value.and_then(|v| Self::deserialize(v).ok())
    }

    /// First non-empty URL.
    pub fn into_display_url(self) -> Option<String> {
        let url = match self {
            Self::SingleUrl(url) => Some(url),
            Self::UrlList(list) => list.into_iter().next().map(|a| a.url),
        };
        url.filter(|u| !u.trim().is_empty())
    }
}

/// Recency ordering requested with `?sort=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    Oldest,
}

impl SortOrder {
    /// Unknown values are ignored rather than rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            _ => None,
        }
    }

    pub fn list_options(order: Option<Self>) -> ListOptions {
        match order {
            Some(Self::Newest) => ListOptions::sorted(CREATED_AT_FIELD, Direction::Desc),
            Some(Self::Oldest) => ListOptions::sorted(CREATED_AT_FIELD, Direction::Asc),
            None => ListOptions::default(),
        }
    }
}

/// `?sort=newest|oldest`
#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
}

impl SortQuery {
    pub fn order(&self) -> Option<SortOrder> {
        self.sort.as_deref().and_then(SortOrder::parse)
    }
}

/// `?keyword=`; missing means match-all.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
}

/// Which side of the calorie threshold a recipe falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalorieBand {
    Low,
    High,
}

impl CalorieBand {
    pub fn of(calories: f64) -> Self {
        if calories <= LOW_CALORIE_MAX {
            Self::Low
        } else {
            Self::High
        }
    }
}

/// A recipe in a filtered listing.
///
/// `index` is the 1-based position in the fetched sequence, before filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeEntry {
    pub index: usize,

    #[serde(flatten)]
    pub recipe: Recipe,

    #[serde(rename = "Calories", skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

/// Request body for creating a recipe.
///
/// Keys are the store column names; lower-case aliases are accepted.
///
/// # Validation
///
/// - `Name`, `Description`, `Ingredients`, `Instructions`: required, non-blank
/// - everything else defaults to `""`
#[derive(Debug, Default, Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(rename = "Name", alias = "name", default)]
    pub name: Option<String>,

    #[serde(rename = "Description", alias = "description", default)]
    pub description: Option<String>,

    #[serde(rename = "Type", alias = "type", default)]
    pub kind: Option<String>,

    #[serde(rename = "Servings", alias = "servings", default)]
    pub servings: Option<Value>,

    /// Free text or a list of linked `Ingredient` ids, forwarded unchanged
    #[serde(rename = "Ingredients", alias = "ingredients", default)]
    pub ingredients: Option<Value>,

    #[serde(rename = "Instructions", alias = "instructions", default)]
    pub instructions: Option<String>,

    #[serde(rename = "Allergies", alias = "allergies", default)]
    pub allergies: Option<String>,

    #[serde(rename = "NutritionAnalysis", alias = "nutritionAnalysis", default)]
    pub nutrition_analysis: Option<String>,

    #[serde(rename = "Image", alias = "image", default)]
    pub image: Option<String>,
}

impl CreateRecipeRequest {
    /// Required fields that are missing or blank, by column name.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let ingredients_missing = !self.ingredients.as_ref().is_some_and(fields::is_present);

        [
            ("Name", fields::is_blank(self.name.as_deref())),
            ("Description", fields::is_blank(self.description.as_deref())),
            ("Ingredients", ingredients_missing),
            ("Instructions", fields::is_blank(self.instructions.as_deref())),
        ]
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| name)
        .collect()
    }

    /// Store fields for the new row, optional columns defaulted to `""`.
    pub fn into_fields(self) -> Map<String, Value> {
        let or_empty = |v: Option<String>| Value::String(v.unwrap_or_default());
        let servings = self
            .servings
            .filter(fields::is_present)
            .unwrap_or_else(|| Value::String(String::new()));

        let mut map = Map::new();
        map.insert("Name".into(), or_empty(self.name));
        map.insert("Description".into(), or_empty(self.description));
        map.insert("Type".into(), or_empty(self.kind));
        map.insert("Servings".into(), servings);
        map.insert(
            "Ingredients".into(),
            self.ingredients.unwrap_or_else(|| Value::String(String::new())),
        );
        map.insert("Instructions".into(), or_empty(self.instructions));
        map.insert("Allergies".into(), or_empty(self.allergies));
        map.insert("NutritionAnalysis".into(), or_empty(self.nutrition_analysis));
        map.insert("Image".into(), or_empty(self.image));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::record;
    use serde_json::json;

    #[test]
    fn test_rating_is_deterministic_and_bounded() {
        for id in ["recA", "rec123XYZ", "", "recZZZZZZZZZZZZZZ", "rec-élan"] {
            let first = rating(id);
            assert_eq!(first, rating(id));
            assert!((3.0..=5.0).contains(&first), "{id} -> {first}");
        }
    }

    #[test]
    fn test_rating_value() {
        // 'a' = 97, 97 % 21 = 13
        assert_eq!(rating("a"), 4.3);
        // 'T' = 84, 84 % 21 = 0
        assert_eq!(rating("T"), 3.0);
    }

    #[test]
    fn test_parse_calories() {
        assert_eq!(parse_calories(&json!(r#"{"calories": 450}"#)), 450.0);
        assert_eq!(parse_calories(&json!(r#"{"calories": "820 kcal"}"#)), 820.0);
        assert_eq!(parse_calories(&json!({ "calories": 701.5 })), 701.5);
        assert_eq!(parse_calories(&json!(r#"{"calories":"not-a-number"}"#)), 0.0);
        assert_eq!(parse_calories(&json!("not json")), 0.0);
        assert_eq!(parse_calories(&json!("")), 0.0);
        assert_eq!(parse_calories(&json!(r#"{"proteins": 12}"#)), 0.0);
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("  12.5g"), 12.5);
        assert_eq!(parse_leading_float("-3"), -3.0);
        assert_eq!(parse_leading_float("1e3 cal"), 1000.0);
        assert_eq!(parse_leading_float("2e"), 2.0);
        assert_eq!(parse_leading_float(".5"), 0.5);
        assert_eq!(parse_leading_float("abc"), 0.0);
        assert_eq!(parse_leading_float("."), 0.0);
    }

    #[test]
    fn test_calorie_band_threshold() {
        assert_eq!(CalorieBand::of(0.0), CalorieBand::Low);
        assert_eq!(CalorieBand::of(700.0), CalorieBand::Low);
        assert_eq!(CalorieBand::of(700.1), CalorieBand::High);
    }

    #[test]
    fn test_from_record_defaults() {
        let mut rec = record("rec1", json!({ "Name": "Soup" }));
        rec.created_time = Some("2025-01-01T00:00:00.000Z".into());
        let recipe = Recipe::from_record(&rec);

        assert_eq!(recipe.name, "Soup");
        assert_eq!(recipe.description, "");
        assert_eq!(recipe.servings, json!(""));
        assert_eq!(recipe.ingredients, RecipeIngredients::Text(String::new()));
        assert_eq!(recipe.image, None);
        assert_eq!(recipe.created_at, "2025-01-01T00:00:00.000Z");
        assert_eq!(recipe.rating, rating("rec1"));
    }

    #[test]
    fn test_from_record_prefers_created_at_field() {
        let mut rec = record("rec1", json!({ "CreatedAt": "2024-05-05" }));
        rec.created_time = Some("2025-01-01T00:00:00.000Z".into());
        assert_eq!(Recipe::from_record(&rec).created_at, "2024-05-05");
    }

    #[test]
    fn test_image_variants() {
        let single = record("r", json!({ "Image": "https://img/a.jpg" }));
        assert_eq!(
            Recipe::from_record(&single).image.as_deref(),
            Some("https://img/a.jpg")
        );

        let list = record(
            "r",
            json!({ "Image": [{ "url": "https://img/1.jpg", "filename": "1.jpg" }, { "url": "https://img/2.jpg" }] }),
        );
        assert_eq!(
            Recipe::from_record(&list).image.as_deref(),
            Some("https://img/1.jpg")
        );

        let empty = record("r", json!({ "Image": "" }));
        assert_eq!(Recipe::from_record(&empty).image, None);

        let empty_list = record("r", json!({ "Image": [] }));
        assert_eq!(Recipe::from_record(&empty_list).image, None);
    }

    #[test]
    fn test_linked_ingredients_resolve_with_fallback() {
        let rec = record("r", json!({ "Ingredients": ["ingA", "ingB"] }));
        let mut recipe = Recipe::from_record(&rec);
        assert!(recipe.ingredients.is_linked());

        let names = HashMap::from([("ingA".to_string(), "Tomato".to_string())]);
        recipe.ingredients.resolve(&names);
        assert_eq!(
            recipe.ingredients,
            RecipeIngredients::Linked(vec!["Tomato".into(), "ingB".into()])
        );
        assert_eq!(recipe.ingredients.search_text(), "Tomato, ingB");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let rec = record(
            "r",
            json!({ "Name": "Starter", "Description": "Tomato Soup", "Instructions": "Boil" }),
        );
        let recipe = Recipe::from_record(&rec);
        assert!(recipe.matches("tomato"));
        assert!(recipe.matches("boil"));
        assert!(recipe.matches(""));
        assert!(!recipe.matches("pasta"));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("newest"), Some(SortOrder::Newest));
        assert_eq!(SortOrder::parse("oldest"), Some(SortOrder::Oldest));
        assert_eq!(SortOrder::parse("random"), None);
        assert_eq!(SortOrder::list_options(None), ListOptions::default());
        assert_eq!(
            SortOrder::list_options(Some(SortOrder::Newest)),
            ListOptions::sorted("CreatedAt", Direction::Desc)
        );
    }

    #[test]
    fn test_missing_fields() {
        let request = CreateRecipeRequest {
            name: Some("Soup".into()),
            description: Some("  ".into()),
            instructions: Some("boil".into()),
            ..Default::default()
        };
        assert_eq!(request.missing_fields(), vec!["Description", "Ingredients"]);
    }

    #[test]
    fn test_linked_ingredient_ids_forwarded() {
        let request: CreateRecipeRequest = serde_json::from_value(json!({
            "Name": "Bread",
            "Description": "Crusty",
            "Ingredients": ["recIngA", "recIngB"],
            "Instructions": "Bake"
        }))
        .unwrap();
        assert!(request.missing_fields().is_empty());
        assert_eq!(
            request.into_fields()["Ingredients"],
            json!(["recIngA", "recIngB"])
        );

        let empty: CreateRecipeRequest = serde_json::from_value(json!({
            "Name": "Bread",
            "Description": "Crusty",
            "Ingredients": [],
            "Instructions": "Bake"
        }))
        .unwrap();
        assert_eq!(empty.missing_fields(), vec!["Ingredients"]);
    }

    #[test]
    fn test_into_fields_defaults() {
        let request: CreateRecipeRequest = serde_json::from_value(json!({
            "name": "Soup",
            "description": "hot",
            "ingredients": "water",
            "instructions": "boil"
        }))
        .unwrap();
        assert!(request.missing_fields().is_empty());

        let fields = request.into_fields();
        assert_eq!(fields["Name"], json!("Soup"));
        assert_eq!(fields["Ingredients"], json!("water"));
        for key in ["Type", "Servings", "Allergies", "NutritionAnalysis", "Image"] {
            assert_eq!(fields[key], json!(""), "{key}");
        }
    }

    #[test]
    fn test_entry_serialization_flattens_recipe() {
        let recipe = Recipe::from_record(&record("rec1", json!({ "Name": "Soup" })));
        let entry = RecipeEntry {
            index: 2,
            recipe,
            calories: Some(0.0),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["index"], json!(2));
        assert_eq!(value["id"], json!("rec1"));
        assert_eq!(value["Name"], json!("Soup"));
        assert_eq!(value["Calories"], json!(0.0));
    }
}
