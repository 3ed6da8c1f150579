//! Error types for the PubMed Explorer client.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request and returned a detail message.
    #[error("API error ({status}): {detail}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `detail` field of the FastAPI error body, or a generic fallback
        detail: String,
    },

    /// Resource not found (404 response)
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Create an API error from a status code and detail message.
    #[must_use]
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api { status, detail: detail.into() }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Render the message a user-facing surface should display.
    ///
    /// Mirrors the alert text of the web client: the server-provided detail
    /// when there is one, a generic fallback otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { detail, .. } if !detail.is_empty() => detail.clone(),
            Self::NotFound { resource } => format!("Not found: {resource}"),
            Self::Http(e) => format!("Request failed: {e}"),
            _ => "An unknown error occurred".to_string(),
        }
    }
}

/// Errors from the local collection store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Filesystem error while persisting a collection
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Positional removal outside the collection bounds
    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Collection length at the time of the call
        len: usize,
    },
}

/// Errors from search state transitions.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StateError {
    /// Requested page outside `1..=total_pages`
    #[error("Page {page} out of range (1..={total_pages})")]
    PageOutOfRange {
        /// Requested page
        page: u32,
        /// Number of pages for the current result set
        total_pages: u32,
    },
}

/// Umbrella error for orchestrated flows that touch the network, the local
/// store and the state machine.
#[derive(thiserror::Error, Debug)]
pub enum ExplorerError {
    /// Error from the HTTP facade
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Error from the local collection store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error from a search state transition
    #[error(transparent)]
    State(#[from] StateError),
}

impl ExplorerError {
    /// Render the message a user-facing surface should display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Client(e) => e.user_message(),
            Self::Store(e) => e.to_string(),
            Self::State(e) => e.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
