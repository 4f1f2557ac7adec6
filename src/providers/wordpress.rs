use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, Deserialize};
use log::error;

use crate::document_processor::Article;
use crate::errors::ProviderError;
use crate::providers::PublishEndpoint;

/// WordPress REST API client creating draft posts
/// via application-password Basic authentication
#[derive(Debug)]
pub struct WordPress {
    /// HTTP client for API requests
    client: Client,
    /// Site base URL, e.g. `https://blog.example.org`
    site_url: String,
    /// WordPress user name
    username: String,
    /// Application password for that user
    app_password: String,
}

/// Post creation payload
#[derive(Debug, Serialize)]
struct PostPayload<'a> {
    /// Post title
    title: &'a str,

    /// Post body as HTML
    content: &'a str,

    /// Publication status, always `draft`
    status: &'a str,
}

/// Created-post response; only the identifier is consumed
#[derive(Debug, Deserialize)]
struct PostCreated {
    id: u64,
}

/// Error body returned by the REST API, e.g.
/// `{"code":"rest_cannot_create","message":"..."}`
#[derive(Debug, Deserialize)]
struct WpErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Pull the structured message out of an error body when it is JSON,
/// falling back to the raw text
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<WpErrorBody>(body) {
        Ok(parsed) => match (parsed.code, parsed.message) {
            (Some(code), Some(message)) => format!("{}: {}", code, message),
            (_, Some(message)) => message,
            _ => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

impl WordPress {
    /// Create a new client for a site
    pub fn new(
        site_url: impl Into<String>,
        username: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            site_url: site_url.into(),
            username: username.into(),
            app_password: app_password.into(),
        }
    }

    /// Posts collection URL under the site's REST namespace
    fn posts_url(&self) -> String {
        format!("{}/wp-json/wp/v2/posts", self.site_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PublishEndpoint for WordPress {
    fn endpoint_url(&self) -> String {
        self.posts_url()
    }

    /// Submit an article as a draft post
    ///
    /// Auth failures map to [`ProviderError::AuthenticationError`], other
    /// non-success statuses to [`ProviderError::ApiError`] carrying the
    /// response body when it can be read.
    async fn create_draft(&self, article: &Article) -> Result<u64, ProviderError> {
        let payload = PostPayload {
            title: &article.title,
            content: &article.content,
            status: "draft",
        };

        let response = self.client.post(self.posts_url())
            .basic_auth(&self.username, Some(&self.app_password))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            let detail = describe_error_body(&error_text);
            error!("WordPress API error ({}): {}", status, detail);

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(
                    format!("{} - {}", status, detail),
                ));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: detail,
            });
        }

        let created = response.json::<PostCreated>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(created.id)
    }
}
