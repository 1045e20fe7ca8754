//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use crate::constants;
use crate::error::Result;
use dotenv::dotenv;
use std::env;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Base URL of the activities service
    pub base_url: String,
    /// Email address to prefill in the signup form
    pub default_email: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            base_url: constants::api::DEFAULT_BASE_URL.to_string(),
            default_email: None,
            timeout_secs: constants::api::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = env::var("ACTIVITIES_BASE_URL") {
            // A trailing slash would double up when joining paths
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(email) = env::var("ACTIVITIES_EMAIL") {
            if !email.is_empty() {
                config.default_email = Some(email);
            }
        }

        if let Ok(secs) = env::var("ACTIVITIES_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.timeout_secs = secs;
            }
        }

        Ok(config)
    }

    /// Check if a signup email was preconfigured
    pub const fn has_default_email(&self) -> bool {
        self.default_email.is_some()
    }
}
