//! Configuration for the SciVal lookup client.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Publication Lookup endpoint (identifier is appended).
    pub const PUBLICATION_LOOKUP_URL: &str = "https://api.elsevier.com/analytics/scival/publication/";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Retries for transient failures.
    pub const MAX_RETRIES: u32 = 3;

    /// Maximum number of documents kept in the in-process cache.
    pub const MEMORY_CACHE_CAPACITY: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Cache directory name under the user's cache root.
    pub const CACHE_DIR_NAME: &str = "scival-lookup";
}

/// Environment variable names.
pub mod env {
    /// Elsevier API key.
    pub const API_KEY: &str = "SCIVAL_API_KEY";

    /// Institution token (optional).
    pub const INST_TOKEN: &str = "SCIVAL_INST_TOKEN";

    /// Cache directory override.
    pub const CACHE_DIR: &str = "SCIVAL_CACHE_DIR";
}

/// Client configuration.
#[derive(Clone)]
pub struct Config {
    /// Elsevier API key.
    pub api_key: Option<String>,

    /// Institution token, sent alongside the API key when set.
    pub inst_token: Option<String>,

    /// Base URL for the Publication Lookup endpoint (for testing with mock servers).
    pub base_url: String,

    /// Root of the on-disk document cache.
    pub cache_dir: PathBuf,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries for transient HTTP failures.
    pub max_retries: u32,

    /// In-process cache capacity.
    pub memory_cache_capacity: u64,
}

impl Config {
    /// Create a new configuration with an optional API key and default settings.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            inst_token: None,
            base_url: api::PUBLICATION_LOOKUP_URL.to_string(),
            cache_dir: default_cache_dir(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            memory_cache_capacity: api::MEMORY_CACHE_CAPACITY,
        }
    }

    /// Create a test configuration pointing at a mock server and a scratch cache.
    #[must_use]
    pub fn for_testing(base_url: &str, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            inst_token: None,
            base_url: format!("{}/analytics/scival/publication/", base_url.trim_end_matches('/')),
            cache_dir: cache_dir.into(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0, // Fail fast in tests
            memory_cache_capacity: 0,
        }
    }

    /// Create configuration from environment variables (and a `.env` file if present).
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::new(std::env::var(env::API_KEY).ok());
        config.inst_token = std::env::var(env::INST_TOKEN).ok();
        if let Some(dir) = std::env::var_os(env::CACHE_DIR) {
            if dir.is_empty() {
                anyhow::bail!("{} is set but empty", env::CACHE_DIR);
            }
            config.cache_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_api_key", &self.has_api_key())
            .field("has_inst_token", &self.inst_token.is_some())
            .field("base_url", &self.base_url)
            .field("cache_dir", &self.cache_dir)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

/// `$HOME/.cache/scival-lookup`, falling back to a relative `.cache` directory.
fn default_cache_dir() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map_or_else(|| PathBuf::from(".cache"), |home| PathBuf::from(home).join(".cache"))
        .join(api::CACHE_DIR_NAME)
}
