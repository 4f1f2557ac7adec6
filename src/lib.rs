/*!
 * # mdpress - Markdown enrichment and draft publishing
 *
 * A Rust library for automating the preparation and publication of a
 * markdown document as WordPress draft posts.
 *
 * ## Features
 *
 * - Detect entry marker lines and enrich them with fetched image references
 * - Query Wikimedia Commons with Google Books as fallback image source
 * - Split a document into articles at header markers, one draft post each
 * - Render article bodies to HTML before submission
 * - Simulated (dry-run) publishing when credentials are absent or forced
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration from the process environment
 * - `document_processor`: Marker grammar, article splitting and HTML rendering
 * - `enrichment`: Image enrichment pass rewriting the document in place
 * - `publisher`: Article submission with per-article failure isolation
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Clients for the external services:
 *   - `providers::wikimedia`: Wikimedia Commons search client
 *   - `providers::google_books`: Google Books volumes client
 *   - `providers::wordpress`: WordPress REST API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod document_processor;
pub mod enrichment;
pub mod publisher;
pub mod app_controller;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, PublishMode};
pub use document_processor::{Article, EntryMarker};
pub use enrichment::{Enricher, EnrichReport};
pub use publisher::{Publisher, PublishReport};
pub use errors::{AppError, DocumentError, ProviderError};
