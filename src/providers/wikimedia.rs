use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use log::{error, debug};

use crate::errors::ProviderError;
use crate::providers::ImageSource;

/// User agent sent with every search request, per Wikimedia API etiquette
const USER_AGENT: &str = concat!("mdpress/", env!("CARGO_PKG_VERSION"));

/// File extensions accepted as usable images; everything else
/// (PDFs, SVGs, audio) is treated as no result
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Wikimedia Commons client searching the File namespace
#[derive(Debug)]
pub struct WikimediaCommons {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
}

/// Top-level search response from the MediaWiki API
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Query block, absent when the search matched nothing
    query: Option<QueryBlock>,
}

/// Query block keyed by page id
#[derive(Debug, Deserialize)]
struct QueryBlock {
    #[serde(default)]
    pages: HashMap<String, FilePage>,
}

/// A single file page with its image info
#[derive(Debug, Deserialize)]
struct FilePage {
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

/// Image info entry carrying the direct file URL
#[derive(Debug, Deserialize)]
struct ImageInfo {
    url: String,
}

impl WikimediaCommons {
    /// Create a new client against the public Commons API
    pub fn new() -> Self {
        Self::with_endpoint("https://commons.wikimedia.org/w/api.php")
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

impl Default for WikimediaCommons {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a URL points at an accepted image file type
fn has_image_extension(url: &str) -> bool {
    let lowered = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(&format!(".{}", ext)))
}

#[async_trait]
impl ImageSource for WikimediaCommons {
    fn name(&self) -> &str {
        "Wikimedia Commons"
    }

    /// Search the File namespace and return the first result's direct URL
    ///
    /// Uses a generator search limited to one page, asking for image info
    /// URLs. Results without an accepted image extension yield `Ok(None)`.
    async fn search(&self, query: &str) -> Result<Option<String>, ProviderError> {
        debug!("Searching Wikimedia Commons for: {}", query);

        let response = self.client.get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("generator", "search"),
                ("gsrnamespace", "6"),
                ("gsrsearch", query),
                ("gsrlimit", "1"),
                ("prop", "imageinfo"),
                ("iiprop", "url"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Wikimedia API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let data = response.json::<SearchResponse>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let Some(query_block) = data.query else {
            return Ok(None);
        };

        for page in query_block.pages.values() {
            if let Some(info) = page.imageinfo.first() {
                if has_image_extension(&info.url) {
                    return Ok(Some(info.url.clone()));
                }
            }
        }

        Ok(None)
    }
}
