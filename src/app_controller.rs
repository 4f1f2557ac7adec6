use anyhow::Result;
use log::{error, warn, info};
use std::path::PathBuf;

use crate::app_config::{Config, PLACEHOLDER_SITE_URL};
use crate::enrichment::Enricher;
use crate::file_utils::FileManager;
use crate::providers::wordpress::WordPress;
use crate::publisher::Publisher;

// @module: Application controller for the two-stage pipeline

/// Per-run options from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Force simulated publishing regardless of credential state
    pub dry_run: bool,

    /// Run the enrichment stage only
    pub enrich_only: bool,

    /// Run the publishing stage only
    pub publish_only: bool,
}

/// Main application controller running enrichment and publishing in sequence
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the pipeline on a single document.
    ///
    /// The enrichment stage runs to completion and persists its output to
    /// the path; the publishing stage then reads the path fresh. The stages
    /// share no in-memory state, so each is independently restartable.
    pub async fn run(&self, input_file: PathBuf, options: RunOptions) -> Result<()> {
        if !options.publish_only {
            info!("Phase 1: image enrichment for {:?}", input_file);
            let enricher = Enricher::with_default_sources();
            enricher.enrich_file(&input_file).await?;
        }

        if options.enrich_only {
            return Ok(());
        }

        info!("Phase 2: splitting and publishing {:?}", input_file);
        let mode = self.config.resolve_publish_mode(options.dry_run);

        // An unconfigured site still needs an endpoint URL for the
        // simulated-mode log lines
        let site_url = if self.config.site_url.is_empty() {
            PLACEHOLDER_SITE_URL
        } else {
            self.config.site_url.as_str()
        };
        let endpoint = WordPress::new(site_url, &self.config.username, &self.config.app_password);
        let publisher = Publisher::new(Box::new(endpoint), mode);
        publisher.publish_file(&input_file).await?;

        Ok(())
    }

    /// Run the pipeline on every markdown file under a directory.
    ///
    /// Per-file errors are logged and the remaining files are still
    /// processed.
    pub async fn run_folder(&self, input_dir: PathBuf, options: RunOptions) -> Result<()> {
        let files = FileManager::find_files(&input_dir, "md")?;
        if files.is_empty() {
            warn!("No markdown files found in directory: {:?}", input_dir);
            return Ok(());
        }

        info!("Processing {} markdown file(s) in {:?}", files.len(), input_dir);

        let mut processed_count = 0;
        for file in files {
            if let Err(e) = self.run(file.clone(), options).await {
                error!("Error processing file {:?}: {}", file, e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} files", processed_count);
        Ok(())
    }
}
