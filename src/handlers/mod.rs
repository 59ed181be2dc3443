//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, query string)
//! 2. Delegates to a service
//! 3. Returns HTTP response (JSON, status code)

/// Contact form endpoint
pub mod contacts;
/// AI recipe generation endpoint
pub mod generate;
/// Service health endpoint
pub mod health;
/// Ingredient endpoints
pub mod ingredients;
/// Recipe endpoints
pub mod recipes;
