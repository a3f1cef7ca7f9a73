//! Error types for channel-search
//!
//! Every fallible operation returns [`Result`]. Errors fall into three
//! groups: configuration problems found before a search starts, search
//! errors raised while interpreting the probe, and transport failures.
//!
//! Throttle signals are not errors: they are absorbed by the retry policy.

use thiserror::Error;

/// The main error type for channel-search
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Search Errors
    // ============================================================================
    /// Raised before any paging begins
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A probe field the search depends on was missing or unusable
    #[error("Failed to parse '{field}' from response: {message}")]
    Parse { field: String, message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Response body is not JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Wrapped
    // ============================================================================
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a response parse error for a named field
    pub fn parse(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// The error underneath any context wrappers
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this error came from the transport layer
    ///
    /// Transport failures are terminal for the page that hit them and,
    /// through fail-fast propagation, for the whole search.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.root(),
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. } | Error::JsonParse(_)
        )
    }

    /// Check if this error was raised before any paging began
    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Error::Validation { .. })
    }
}

/// Result type alias for channel-search
pub type Result<T> = std::result::Result<T, Error>;

/// Attach a description of what was being attempted to an error
pub trait ResultExt<T> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}
