use anyhow::Result;
use log::{error, warn, info};
use std::path::Path;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::PublishMode;
use crate::document_processor::{self, Article};
use crate::file_utils::FileManager;
use crate::providers::PublishEndpoint;

// @module: Article splitting and draft submission

/// Characters of rendered content shown in simulated-mode log lines
const PREVIEW_CHARS: usize = 100;

/// Counters for one publishing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Articles extracted from the document
    pub articles: usize,

    /// Drafts created on the endpoint
    pub submitted: usize,

    /// Articles logged instead of submitted (simulated mode)
    pub simulated: usize,

    /// Articles whose submission failed
    pub failed: usize,
}

/// Splits the document into articles and submits each as a draft,
/// or logs the intended submission in simulated mode
pub struct Publisher {
    // @field: Draft creation endpoint
    endpoint: Box<dyn PublishEndpoint>,

    // @field: Live or simulated submission
    mode: PublishMode,
}

impl Publisher {
    /// Create a publisher for an endpoint and mode
    pub fn new(endpoint: Box<dyn PublishEndpoint>, mode: PublishMode) -> Self {
        Publisher { endpoint, mode }
    }

    /// Split the document at `path` and submit every article in order.
    ///
    /// A missing file is reported and treated as a no-op. One article's
    /// failure is logged and never aborts the batch.
    pub async fn publish_file<P: AsRef<Path>>(&self, path: P) -> Result<PublishReport> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            warn!("File not found: {:?}", path);
            return Ok(PublishReport::default());
        }

        let content = FileManager::read_to_string(path)?;
        let articles = document_processor::split_articles(&content);

        info!("Found {} articles. Starting upload...", articles.len());

        let progress_bar = ProgressBar::new(articles.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} articles ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let mut report = PublishReport {
            articles: articles.len(),
            ..Default::default()
        };

        for article in &articles {
            progress_bar.set_message(article.title.clone());
            self.submit(article, &mut report).await;
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(
            "Publishing complete: {} articles, {} submitted, {} simulated, {} failed",
            report.articles, report.submitted, report.simulated, report.failed
        );
        Ok(report)
    }

    /// Submit or simulate a single article
    async fn submit(&self, article: &Article, report: &mut PublishReport) {
        match self.mode {
            PublishMode::Simulated => {
                info!("--- [DRY RUN] Posting article: {} ---", article.title);
                info!("Endpoint: {}", self.endpoint.endpoint_url());
                info!("Content (truncated): {}...", preview(&article.content, PREVIEW_CHARS));
                report.simulated += 1;
            }
            PublishMode::Live => match self.endpoint.create_draft(article).await {
                Ok(id) => {
                    info!("Successfully posted: {} (ID: {})", article.title, id);
                    report.submitted += 1;
                }
                Err(e) => {
                    error!("Failed to post {}: {}", article.title, e);
                    report.failed += 1;
                }
            },
        }
    }
}

/// Truncate to at most `max_chars` characters, on a char boundary
fn preview(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
