//! Recipe query pipeline: keyword search and calorie partitioning.
//!
//! Both work on an already-fetched, already-normalized sequence and keep
//! its order. Each returned entry carries its 1-based position in that
//! sequence, so positions survive filtering.

use crate::models::recipe::{CalorieBand, Recipe, RecipeEntry};

/// Recipes whose text contains `keyword`, ignoring case. An empty keyword keeps everything.
pub fn search(recipes: Vec<Recipe>, keyword: &str) -> Vec<RecipeEntry> {
    let keyword = keyword.to_lowercase();

    recipes
        .into_iter()
        .enumerate()
        .filter(|(_, recipe)| recipe.matches(&keyword))
        .map(|(i, recipe)| RecipeEntry {
            index: i + 1,
            recipe,
            calories: None,
        })
        .collect()
}

/// Recipes in `band`, each annotated with its parsed calories.
pub fn by_calories(recipes: Vec<Recipe>, band: CalorieBand) -> Vec<RecipeEntry> {
    recipes
        .into_iter()
        .enumerate()
        .filter_map(|(i, recipe)| {
            let calories = recipe.calories();
            (CalorieBand::of(calories) == band).then_some(RecipeEntry {
                index: i + 1,
                recipe,
                calories: Some(calories),
            })
        })
        .collect()
}
