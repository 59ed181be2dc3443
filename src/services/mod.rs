//! Business logic services.
//!
//! Services hold the logic separated from HTTP handlers: validation,
//! store access, normalization and calls to external APIs.

pub mod contact_service;
pub mod generation_service;
pub mod image_search;
pub mod ingredient_service;
pub mod recipe_filters;
pub mod recipe_service;
pub mod text_generation;
