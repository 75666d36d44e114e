//! Error types for the IP list synchronization tool.
//!
//! Errors are split by the collaborator that raised them: local configuration,
//! the remote range feed, and the Illumio PCE API. Every variant here is fatal
//! to a run; best-effort steps report their failures without constructing a
//! [`SyncError`] that reaches `main`.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the synchronization tool.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Range feed errors.
    #[error("Error fetching Zscaler IPs: {0}")]
    Feed(#[from] FeedError),

    /// Illumio PCE API errors.
    #[error("PCE error: {0}")]
    Pce(#[from] PceError),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required credential was supplied neither as a flag nor in the environment.
    #[error("{flag} or {env} environment variable is required")]
    MissingCredential {
        /// Command-line flag that would supply the value.
        flag: &'static str,
        /// Environment variable that would supply the value.
        env: &'static str,
    },

    /// Validation failed.
    #[error("Invalid setting {field}: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Setting that failed validation.
        field: String,
    },

    /// The .env file exists but could not be loaded.
    #[error("Failed to load .env file {path}: {message}")]
    DotenvError {
        /// Path to the .env file.
        path: PathBuf,
        /// Description of the load failure.
        message: String,
    },
}

/// Errors raised while fetching the published range list.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request never produced a response (connect failure, timeout, TLS).
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Feed URL.
        url: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The feed answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Feed URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not the expected document.
    #[error("invalid feed document: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
}

/// Illumio PCE API errors.
#[derive(Debug, Error)]
pub enum PceError {
    /// The HTTP client could not be built from the connection settings.
    #[error("Error connecting to Illumio PCE: {message}")]
    Connection {
        /// Description of the failure.
        message: String,
    },

    /// Authentication failed.
    #[error("PCE authentication failed ({status})")]
    AuthenticationFailed {
        /// HTTP status code.
        status: u16,
    },

    /// API request failed.
    #[error("PCE API request failed: {status} - {message}")]
    ApiRequestFailed {
        /// HTTP status code.
        status: u16,
        /// Error message from API.
        message: String,
    },

    /// Network error.
    #[error("Network error communicating with PCE: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },

    /// Invalid response from API.
    #[error("Invalid response from PCE API: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },
}

/// Result type alias for synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;

impl ConfigError {
    /// Creates a validation error for a specific setting.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: field.into(),
        }
    }
}

impl FeedError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

impl PceError {
    /// Creates an API request error.
    #[must_use]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiRequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates an invalid-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
