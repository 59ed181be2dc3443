//! Image search client (Unsplash).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ImageSearchError {
    #[error("Image search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image search returned {0}")]
    Status(u16),
}

/// Finds photo URLs for a free-text query.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Up to `per_page` photo URLs, best match first.
    async fn search(&self, query: &str, per_page: u32) -> Result<Vec<String>, ImageSearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    #[serde(default)]
    alt_description: Option<String>,
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: Option<String>,
    full: Option<String>,
}

impl Photo {
    /// `regular` size, falling back to `full`.
    fn url(self) -> Option<String> {
        self.urls
            .regular
            .filter(|u| !u.is_empty())
            .or(self.urls.full)
            .filter(|u| !u.is_empty())
    }
}

#[derive(Clone)]
pub struct UnsplashClient {
    http: reqwest::Client,
    api_url: String,
    access_key: String,
}

impl UnsplashClient {
    pub fn new(api_url: &str, access_key: &str, timeout: Duration) -> Result<Self, ImageSearchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        })
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn search(&self, query: &str, per_page: u32) -> Result<Vec<String>, ImageSearchError> {
        let response = self
            .http
            .get(format!("{}/search/photos", self.api_url))
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .query(&[
                ("query", query.to_string()),
                ("per_page", per_page.to_string()),
                ("orientation", "landscape".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImageSearchError::Status(response.status().as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        if let Some(first) = body.results.first() {
            tracing::debug!(
                query,
                alt = first.alt_description.as_deref().unwrap_or("no description"),
                "image found"
            );
        }

        Ok(body.results.into_iter().filter_map(Photo::url).collect())
    }
}
