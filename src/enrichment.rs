use anyhow::Result;
use log::{error, warn, info, debug};
use std::path::Path;

use crate::document_processor::{self, EntryMarker};
use crate::file_utils::FileManager;
use crate::providers::ImageSource;
use crate::providers::wikimedia::WikimediaCommons;
use crate::providers::google_books::GoogleBooks;

// @module: Image enrichment pass over the markdown document

/// Counters for one enrichment run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Entry marker lines seen
    pub entries: usize,

    /// Image references inserted
    pub inserted: usize,

    /// Entries skipped because an image reference already followed
    pub skipped: usize,

    /// Entries for which no source returned an image
    pub missed: usize,
}

/// Scans the document for entry marker lines and inserts fetched
/// image references beneath them, querying the configured sources
/// in order until one returns a result
pub struct Enricher {
    // @field: Image sources, tried in order
    sources: Vec<Box<dyn ImageSource>>,
}

impl Enricher {
    /// Create an enricher with an explicit source list
    pub fn new(sources: Vec<Box<dyn ImageSource>>) -> Self {
        Enricher { sources }
    }

    /// Create an enricher with the production source order:
    /// Wikimedia Commons first, Google Books as fallback
    pub fn with_default_sources() -> Self {
        Self::new(vec![
            Box::new(WikimediaCommons::new()),
            Box::new(GoogleBooks::new()),
        ])
    }

    /// Enrich the document at `path` in place.
    ///
    /// A missing file is reported and treated as a no-op. The file is read
    /// whole, transformed in memory, and written back in a single write, so
    /// a failure mid-query leaves it untouched and the run is safe to
    /// repeat.
    pub async fn enrich_file<P: AsRef<Path>>(&self, path: P) -> Result<EnrichReport> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            warn!("File not found: {:?}", path);
            return Ok(EnrichReport::default());
        }

        let content = FileManager::read_to_string(path)?;
        let (enriched, report) = self.enrich_content(&content).await;
        FileManager::write_to_file(path, &enriched)?;

        info!(
            "Image enrichment complete: {} entries, {} inserted, {} already present, {} without result",
            report.entries, report.inserted, report.skipped, report.missed
        );
        Ok(report)
    }

    /// Enrich a document blob, returning the new content and counters.
    ///
    /// Each line is copied unchanged. When a line parses as an entry marker
    /// and the following line is not already an image reference, the sources
    /// are queried with the search name and a reference line is inserted
    /// directly beneath the marker. Re-running on already-enriched content
    /// yields identical output.
    pub async fn enrich_content(&self, content: &str) -> (String, EnrichReport) {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let mut output = String::with_capacity(content.len());
        let mut report = EnrichReport::default();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            output.push_str(line);
            i += 1;

            let Some(marker) = EntryMarker::parse(line) else {
                continue;
            };
            report.entries += 1;

            if i < lines.len() && document_processor::is_image_reference(lines[i]) {
                debug!("Skipping {}, image already present.", marker.search_name);
                report.skipped += 1;
                continue;
            }

            info!("Found entry: {}", marker);
            match self.lookup(&marker.search_name).await {
                Some(url) => {
                    info!("Found image: {}", url);
                    // A marker on the final, unterminated line still gets
                    // its reference on a line of its own
                    if !output.ends_with('\n') {
                        output.push('\n');
                    }
                    output.push_str(&marker.image_reference_line(&url));
                    report.inserted += 1;
                }
                None => {
                    warn!("No image found for {}", marker.search_name);
                    report.missed += 1;
                }
            }
        }

        (output, report)
    }

    /// Query the sources in order; the first hit wins.
    ///
    /// Transport and parse failures are logged and treated as "no result"
    /// so the scan always continues to the next source or the next entry.
    async fn lookup(&self, query: &str) -> Option<String> {
        for source in &self.sources {
            match source.search(query).await {
                Ok(Some(url)) => return Some(url),
                Ok(None) => debug!("{}: no result for {}", source.name(), query),
                Err(e) => error!("Error fetching from {}: {}", source.name(), e),
            }
        }
        None
    }
}
