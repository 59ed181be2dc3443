//! Data models for store rows and API request/response bodies.

/// Contact form submission
pub mod contact;
/// Create-endpoint response
pub mod created;
/// Store field helpers
pub mod fields;
/// AI generation request
pub mod generation;
/// Ingredient rows
pub mod ingredient;
/// Recipe rows, derived fields and listing queries
pub mod recipe;
