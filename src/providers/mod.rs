/*!
 * Provider implementations for the external services.
 *
 * This module contains client implementations for the remote collaborators:
 * - Wikimedia Commons: primary image search
 * - Google Books: fallback image search (book covers)
 * - WordPress: REST endpoint for draft post creation
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::document_processor::Article;
use crate::errors::ProviderError;

/// Common trait for image search providers
///
/// An image source answers a free-text query with at most one image URL.
/// `Ok(None)` means the provider responded but had no usable result;
/// errors carry transport or protocol failures and are handled by the
/// caller's fallback logic.
#[async_trait]
pub trait ImageSource: Send + Sync + Debug {
    /// Human-readable provider name, used in log output
    fn name(&self) -> &str;

    /// Search for an image matching the query
    ///
    /// # Arguments
    /// * `query` - Free-text search query
    ///
    /// # Returns
    /// * `Result<Option<String>, ProviderError>` - An image URL, no result, or an error
    async fn search(&self, query: &str) -> Result<Option<String>, ProviderError>;
}

/// Common trait for the publishing endpoint
///
/// Abstracts draft creation so the publisher can run against the real
/// WordPress REST API or an in-memory test double.
#[async_trait]
pub trait PublishEndpoint: Send + Sync + Debug {
    /// URL the drafts are submitted to, shown in simulated-mode logs
    fn endpoint_url(&self) -> String;

    /// Create a draft post from an article
    ///
    /// # Arguments
    /// * `article` - The title and rendered HTML body to submit
    ///
    /// # Returns
    /// * `Result<u64, ProviderError>` - The created post identifier or an error
    async fn create_draft(&self, article: &Article) -> Result<u64, ProviderError>;
}

pub mod wikimedia;
pub mod google_books;
pub mod wordpress;
