//! CookSync API - Main Application Entry Point
//!
//! A JSON API for browsing, searching and creating recipes. Recipes,
//! ingredients and contact submissions live in an Airtable base; recipe
//! generation uses a chat completion API and an image search API.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Record Store**: Airtable REST API over reqwest
//! - **Generation**: OpenAI chat completions + Unsplash photo search
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the store and API clients
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

mod app;
mod config;
mod error;
mod handlers;
mod models;
mod services;
mod state;
mod store;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let state = state::AppState::init(&config)?;
    tracing::info!(base_id = %config.airtable_base_id, "Clients initialized");

    let app = app::build_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
