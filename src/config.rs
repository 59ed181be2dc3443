//! Application configuration management.
//!
//! Configuration is read from environment variables with the `envy` crate,
//! after an optional `.env` file has been loaded.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `AIRTABLE_API_KEY` or `AIRTABLE_TOKEN` (one required): Airtable personal access token.
///   When both are set `AIRTABLE_API_KEY` wins.
/// - `AIRTABLE_BASE_ID` (required): base holding the Recipes, Ingredient and Contacts tables
/// - `AIRTABLE_API_URL` (optional): defaults to `https://api.airtable.com/v0`
/// - `OPENAI_API_KEY` (required): key for the chat completion API
/// - `OPENAI_API_URL` (optional): defaults to `https://api.openai.com/v1`
/// - `OPENAI_MODEL` (optional): defaults to `gpt-3.5-turbo`
/// - `UNSPLASH_ACCESS_KEY` (required): Unsplash client id
/// - `UNSPLASH_API_URL` (optional): defaults to `https://api.unsplash.com`
/// - `PORT` (optional): HTTP server port, defaults to 5000
/// - `HTTP_TIMEOUT_SECS` (optional): outbound request timeout, defaults to 30
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub airtable_api_key: Option<String>,

    #[serde(default)]
    pub airtable_token: Option<String>,

    pub airtable_base_id: String,

    #[serde(default = "default_airtable_url")]
    pub airtable_api_url: String,

    pub openai_api_key: String,

    #[serde(default = "default_openai_url")]
    pub openai_api_url: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    pub unsplash_access_key: String,

    #[serde(default = "default_unsplash_url")]
    pub unsplash_api_url: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_timeout")]
    pub http_timeout_secs: u64,
}

fn default_airtable_url() -> String {
    "https://api.airtable.com/v0".to_string()
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_unsplash_url() -> String {
    "https://api.unsplash.com".to_string()
}

/// Default port if PORT environment variable is not set.
fn default_port() -> u16 {
    5000
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value
    /// cannot be parsed into the expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()?.validated()
    }

    /// The Airtable credential, preferring `AIRTABLE_API_KEY`.
    pub fn airtable_key(&self) -> Option<&str> {
        [&self.airtable_api_key, &self.airtable_token]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.trim().is_empty())
    }

    fn validated(self) -> Result<Self, envy::Error> {
        if self.airtable_key().is_none() {
            return Err(envy::Error::Custom(
                "AIRTABLE_API_KEY or AIRTABLE_TOKEN must be set".to_string(),
            ));
        }
        Ok(self)
    }
}
