//! Shared application state.
//!
//! Holds the process-scoped collaborators every handler needs. Each one is
//! built once at start-up and never mutated afterwards.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::image_search::{ImageSearch, UnsplashClient};
use crate::services::text_generation::{OpenAiClient, TextGenerator};
use crate::store::{AirtableClient, RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub generator: Arc<dyn TextGenerator>,
    pub images: Arc<dyn ImageSearch>,
}

impl AppState {
    pub fn init(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        let store = AirtableClient::new(
            &config.airtable_api_url,
            &config.airtable_base_id,
            config.airtable_key().unwrap_or_default(),
            timeout,
        )?;
        let generator = OpenAiClient::new(
            &config.openai_api_url,
            &config.openai_api_key,
            &config.openai_model,
            timeout,
        )?;
        let images = UnsplashClient::new(&config.unsplash_api_url, &config.unsplash_access_key, timeout)?;

        Ok(Self::from_parts(
            Arc::new(store),
            Arc::new(generator),
            Arc::new(images),
        ))
    }

    pub fn from_parts(
        store: Arc<dyn RecordStore>,
        generator: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageSearch>,
    ) -> Self {
        Self {
            store,
            generator,
            images,
        }
    }
}

#[cfg(test)]
pub mod fakes {
    //! Canned collaborators for handler and service tests.

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::services::image_search::{ImageSearch, ImageSearchError};
    use crate::services::text_generation::{GenerationError, TextGenerator};

    /// Replies with a fixed completion and remembers the prompts it saw.
    pub struct FakeGenerator {
        reply: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().ok_or(GenerationError::EmptyReply)
        }
    }

    /// Returns results only for queries listed in `hits`.
    pub struct FakeImages {
        hits: Vec<(String, String)>,
        fail: bool,
        pub queries: Mutex<Vec<String>>,
    }

    impl FakeImages {
        pub fn with_hits(hits: &[(&str, &str)]) -> Self {
            Self {
                hits: hits
                    .iter()
                    .map(|(q, u)| (q.to_string(), u.to_string()))
                    .collect(),
                fail: false,
                queries: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                hits: Vec::new(),
                fail: true,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageSearch for FakeImages {
        async fn search(&self, query: &str, _per_page: u32) -> Result<Vec<String>, ImageSearchError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(ImageSearchError::Status(500));
            }
            Ok(self
                .hits
                .iter()
                .filter(|(q, _)| q == query)
                .map(|(_, url)| url.clone())
                .collect())
        }
    }
}
