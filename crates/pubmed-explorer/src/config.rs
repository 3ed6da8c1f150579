//! Configuration for the PubMed Explorer client.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Default base URL of the backend service.
    pub const BASE_URL: &str = "http://localhost:8000";

    /// Request timeout (the backend itself waits up to 30s on PubMed E-utilities).
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Results per page. The backend caps `page_size` at 100.
    pub const PAGE_SIZE: u32 = 20;

    /// Maximum `page_size` the backend accepts.
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Default `max_results` for the server-side CSV export.
    pub const EXPORT_MAX_RESULTS: u32 = 100;

    /// Hard cap on `max_results` for the server-side CSV export.
    pub const EXPORT_RESULT_CAP: u32 = 500;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Local persistence constants.
pub mod storage {
    /// Collection key for bookmarked papers.
    pub const BOOKMARKS_KEY: &str = "pubmed_bookmarks";

    /// Collection key for search history.
    pub const HISTORY_KEY: &str = "pubmed_search_history";

    /// Maximum number of retained history entries.
    pub const HISTORY_LIMIT: usize = 20;
}

/// Default data directory: `~/.pubmed_explorer`.
fn default_data_dir() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".pubmed_explorer"), |p| p.join(".pubmed_explorer"))
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend service.
    pub base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Language passed to the AI endpoints ("korean" or "english").
    pub language: String,

    /// Directory holding the bookmark and history collections.
    pub data_dir: PathBuf,
}

impl Config {
    /// Create a new configuration pointed at the given backend.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            language: "korean".to_string(),
            data_dir: default_data_dir(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `PUBMED_EXPLORER_URL`, `PUBMED_EXPLORER_LANG` and
    /// `PUBMED_EXPLORER_DATA_DIR`; unset variables fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("PUBMED_EXPLORER_URL").unwrap_or_else(|_| api::BASE_URL.to_string()),
        );

        if let Ok(lang) = std::env::var("PUBMED_EXPLORER_LANG") {
            config.language = lang;
        }

        if let Ok(dir) = std::env::var("PUBMED_EXPLORER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config
    }

    /// Create a test configuration with short timeouts for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            language: "english".to_string(),
            data_dir: std::env::temp_dir().join("pubmed_explorer_tests"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::BASE_URL)
    }
}
