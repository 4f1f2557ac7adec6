use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use log::{error, debug};

use crate::errors::ProviderError;
use crate::providers::ImageSource;

/// User agent sent with every volumes request
const USER_AGENT: &str = concat!("mdpress/", env!("CARGO_PKG_VERSION"));

/// Google Books client used as the fallback image source,
/// answering queries with the first matching volume's cover thumbnail
#[derive(Debug)]
pub struct GoogleBooks {
    /// HTTP client for API requests
    client: Client,
    /// Volumes API endpoint URL
    endpoint: String,
}

/// Volumes search response
#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

/// A single catalog record
#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: Option<VolumeInfo>,
}

/// Volume metadata block
#[derive(Debug, Deserialize)]
struct VolumeInfo {
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
}

/// Cover image links for a volume
#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl GoogleBooks {
    /// Create a new client against the public volumes API
    pub fn new() -> Self {
        Self::with_endpoint("https://www.googleapis.com/books/v1/volumes")
    }

    /// Create a new client against a custom endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for GoogleBooks {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageSource for GoogleBooks {
    fn name(&self) -> &str {
        "Google Books"
    }

    /// Return the cover thumbnail of the first matching volume, if any
    async fn search(&self, query: &str) -> Result<Option<String>, ProviderError> {
        debug!("Searching Google Books for: {}", query);

        let response = self.client.get(&self.endpoint)
            .query(&[
                ("q", query),
                ("maxResults", "1"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Books API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let data = response.json::<VolumesResponse>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let thumbnail = data.items.into_iter()
            .next()
            .and_then(|volume| volume.volume_info)
            .and_then(|info| info.image_links)
            .and_then(|links| links.thumbnail);

        Ok(thumbnail)
    }
}
