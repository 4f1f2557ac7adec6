use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use log::warn;
use url::Url;

/// Application configuration module
/// This module handles the application configuration sourced from the
/// process environment, including placeholder detection and resolution
/// of the publishing mode.
/// Environment variable holding the WordPress site base URL
pub const ENV_SITE_URL: &str = "WP_SITE_URL";

/// Environment variable holding the WordPress user name
pub const ENV_USER: &str = "WP_USER";

/// Environment variable holding the WordPress application password
pub const ENV_APP_PASSWORD: &str = "WP_APP_PASSWORD";

/// Site URL shipped in the example environment file; treating it as
/// real configuration would post drafts at a non-existent site
pub const PLACEHOLDER_SITE_URL: &str = "https://example.com";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// WordPress site base URL
    #[serde(default)]
    pub site_url: String,

    /// WordPress user name
    #[serde(default)]
    pub username: String,

    /// WordPress application password
    #[serde(default)]
    pub app_password: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    // @level: Error
    Error,
    // @level: Warn
    Warn,
    // @level: Info
    #[default]
    Info,
    // @level: Debug
    Debug,
    // @level: Trace
    Trace,
}

/// How articles are submitted to the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishMode {
    /// Authenticated draft creation against the configured site
    Live,
    /// No network I/O; intended submissions are logged instead
    Simulated,
}

impl std::fmt::Display for PublishMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Missing variables yield empty fields rather than errors; absent
    /// credentials later force simulated publishing instead of failing.
    pub fn from_env() -> Self {
        Config {
            site_url: std::env::var(ENV_SITE_URL).unwrap_or_default(),
            username: std::env::var(ENV_USER).unwrap_or_default(),
            app_password: std::env::var(ENV_APP_PASSWORD).unwrap_or_default(),
            log_level: LogLevel::default(),
        }
    }

    /// Whether all three credential values are present
    pub fn credentials_present(&self) -> bool {
        !self.site_url.is_empty() && !self.username.is_empty() && !self.app_password.is_empty()
    }

    /// Whether the site URL is the shipped placeholder value
    pub fn is_placeholder(&self) -> bool {
        self.site_url == PLACEHOLDER_SITE_URL
    }

    /// Resolve the publishing mode for a run.
    ///
    /// Simulated when the dry-run flag is set, when credentials are
    /// missing, or when the configuration is the placeholder; Live
    /// otherwise.
    pub fn resolve_publish_mode(&self, force_dry_run: bool) -> PublishMode {
        if force_dry_run {
            return PublishMode::Simulated;
        }
        if !self.credentials_present() {
            warn!("WordPress credentials missing in environment. Switching to simulated publishing.");
            return PublishMode::Simulated;
        }
        if self.is_placeholder() {
            warn!("Detected placeholder site URL, enforcing simulated publishing.");
            return PublishMode::Simulated;
        }
        PublishMode::Live
    }

    /// Validate the configuration after loading.
    ///
    /// Only a configuration that would publish live needs a well-formed
    /// site URL; anything else runs simulated and stays valid.
    pub fn validate(&self) -> Result<()> {
        if self.credentials_present() && !self.is_placeholder() {
            let parsed = Url::parse(&self.site_url)
                .map_err(|e| anyhow!("Invalid site URL '{}': {}", self.site_url, e))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(anyhow!("Site URL must use http or https: {}", self.site_url));
            }
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            site_url: String::new(),
            username: String::new(),
            app_password: String::new(),
            log_level: LogLevel::default(),
        }
    }
}
