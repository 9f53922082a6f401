//! Configuration management for redcollect.
//!
//! Configuration is read from `~/.config/redcollect/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! Secrets never live in this file; see [`Credentials`].

pub mod credentials;

pub use credentials::Credentials;

use crate::domain::TimeRange;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reddit: RedditConfig,
    pub collector: CollectorConfig,
}

/// Remote API endpoints and HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedditConfig {
    /// Host serving the OAuth2 token endpoint
    pub auth_url: String,
    /// Host serving authenticated API calls
    pub api_url: String,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// User agent used when `REDDIT_USER_AGENT` is unset
    pub user_agent: Option<String>,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            auth_url: "https://www.reddit.com".to_string(),
            api_url: "https://oauth.reddit.com".to_string(),
            timeout_secs: 10,
            user_agent: None,
        }
    }
}

impl RedditConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// What to collect and how fast.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub subreddit: String,
    pub time_range: TimeRange,
    /// Maximum items per run (default: 10)
    pub limit: usize,
    /// Maximum top-level comments per item (default: 5)
    pub comment_limit: usize,
    /// Pause between items in milliseconds (default: 1200)
    pub throttle_ms: u64,
    /// Continuation placeholders resolved per item; unset resolves all
    pub max_expansions: Option<usize>,
    /// Where to write the JSON document; unset keeps results in memory only
    pub output: Option<PathBuf>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            subreddit: "diy".to_string(),
            time_range: TimeRange::Month,
            limit: 10,
            comment_limit: 5,
            throttle_ms: 1200,
            max_expansions: None,
            output: None,
        }
    }
}

impl CollectorConfig {
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// If the default config file doesn't exist, creates one with comments.
    /// An explicitly given path must exist.
    /// Missing fields in the config file will use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the default config file path: `~/.config/redcollect/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("redcollect").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# redcollect configuration
#
# Credentials are read from the environment (or a .env file), never from here:
#   REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET, REDDIT_USER_AGENT

[reddit]
# OAuth2 token host and API host
auth_url = "https://www.reddit.com"
api_url = "https://oauth.reddit.com"

# Request timeout in seconds
timeout_secs = 10

# User agent used when REDDIT_USER_AGENT is not set
# user_agent = "redcollect/0.1 by /u/yourusername"

[collector]
# Subreddit to read, without the r/ prefix
subreddit = "diy"

# Window for the top listing: hour, day, week, month, year, all
time_range = "month"

# Number of posts per run
limit = 10

# Top-level comments kept per post
comment_limit = 5

# Pause between posts in milliseconds
throttle_ms = 1200

# Continuation placeholders resolved per post (0 drops them; omit to resolve all)
# max_expansions = 0

# Write collected posts as JSON to this path ("-" for stdout)
# output = "reddit-test-data.json"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
