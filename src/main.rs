// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, LogLevel};
use crate::app_controller::{Controller, RunOptions};

mod app_config;
mod app_controller;
mod document_processor;
mod enrichment;
mod errors;
mod file_utils;
mod providers;
mod publisher;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enrich a markdown document and publish its articles as drafts (default command)
    Run(RunArgs),

    /// Generate shell completions for mdpress
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input markdown file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Simulate publishing without making API calls
    #[arg(short, long)]
    dry_run: bool,

    /// Run the image enrichment stage only
    #[arg(short, long, conflicts_with = "publish_only")]
    enrich_only: bool,

    /// Run the publishing stage only
    #[arg(short, long)]
    publish_only: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// mdpress - Markdown enrichment and draft publishing
///
/// Enriches entries in a markdown document with fetched image references,
/// then splits the document into articles and submits each as a WordPress
/// draft post.
#[derive(Parser, Debug)]
#[command(name = "mdpress")]
#[command(version = "0.1.0")]
#[command(about = "Markdown image enrichment and WordPress draft publishing")]
#[command(long_about = "mdpress scans a markdown document for entry marker lines, inserts fetched
image references beneath them, then splits the document into articles and
submits each one as a WordPress draft post.

EXAMPLES:
    mdpress photo_history.md                   # Enrich and publish using env credentials
    mdpress --dry-run photo_history.md         # Simulate publishing, no API calls
    mdpress -e photo_history.md                # Image enrichment only
    mdpress -p photo_history.md                # Publishing only, skip enrichment
    mdpress --log-level debug docs/            # Process every .md file in a directory
    mdpress completions bash > mdpress.bash    # Generate bash completions

CONFIGURATION:
    Credentials are read from the environment: WP_SITE_URL, WP_USER and
    WP_APP_PASSWORD. When any of them is missing, or WP_SITE_URL is the
    example placeholder, publishing runs in simulated mode.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input markdown file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Simulate publishing without making API calls
    #[arg(short, long)]
    dry_run: bool,

    /// Run the image enrichment stage only
    #[arg(short, long, conflicts_with = "publish_only")]
    enrich_only: bool,

    /// Run the publishing stage only
    #[arg(short, long)]
    publish_only: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());
            let emoji = Self::get_emoji_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level from the command line if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "mdpress", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Run(args)) => run_pipeline(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let run_args = RunArgs {
                input_path,
                dry_run: cli.dry_run,
                enrich_only: cli.enrich_only,
                publish_only: cli.publish_only,
                log_level: cli.log_level,
            };
            run_pipeline(run_args).await
        }
    }
}

async fn run_pipeline(options: RunArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    // Build configuration from the environment, once, up front
    let config = Config::from_env();
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, take it from the config
    if options.log_level.is_none() {
        let log_level = match config.log_level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(log_level);
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    let run_options = RunOptions {
        dry_run: options.dry_run,
        enrich_only: options.enrich_only,
        publish_only: options.publish_only,
    };

    // Run the controller with the input file or directory
    if options.input_path.is_file() {
        controller.run(options.input_path.clone(), run_options).await?;
    } else if options.input_path.is_dir() {
        controller.run_folder(options.input_path.clone(), run_options).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
