//! Error types for rollcall
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Coarse classification of a failed remote request.
///
/// Derived from the HTTP status code when a response was received, or
/// [`StatusCategory::Transport`] when the request never produced a usable
/// response (connection refused, timeout, undecodable body).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// The server rejected the request as invalid (400 and other 4xx).
    Invalid,
    /// Credentials were missing or wrong (401).
    Unauthorized,
    /// The addressed resource does not exist (404).
    NotFound,
    /// The server failed internally (5xx).
    Server,
    /// The request never completed: connection, timeout, or decode failure.
    Transport,
}

impl StatusCategory {
    /// Maps a non-success HTTP status onto its category.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized,
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            s if s.is_server_error() => Self::Server,
            _ => Self::Invalid,
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid => write!(f, "invalid request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::NotFound => write!(f, "not found"),
            Self::Server => write!(f, "server error"),
            Self::Transport => write!(f, "network error"),
        }
    }
}

/// Main error type for rollcall operations
///
/// This enum encompasses all possible errors that can occur while loading
/// configuration, talking to the remote auth and registry services, and
/// persisting the session token.
#[derive(Error, Debug)]
pub enum RollcallError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session storage errors (token scope reads/writes that genuinely
    /// failed, as opposed to a merely absent or malformed token)
    #[error("Session error: {0}")]
    Session(String),

    /// A remote request that was sent but rejected, or never completed.
    ///
    /// `detail` is the server-reported message, already normalized: a
    /// per-field validation list is joined into a single string in order.
    #[error("{category}: {detail}")]
    Remote {
        /// Coarse failure classification
        category: StatusCategory,
        /// Human-readable server-reported detail
        detail: String,
    },

    /// A flow-level failure whose message is already user-facing. Used by
    /// the command handlers so the process exits non-zero after the
    /// notice has been shown.
    #[error("{0}")]
    Rejected(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl RollcallError {
    /// Builds a [`RollcallError::Remote`] from its parts.
    pub fn remote(category: StatusCategory, detail: impl Into<String>) -> Self {
        Self::Remote {
            category,
            detail: detail.into(),
        }
    }
}

/// Result type alias for rollcall operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

/// Extracts the normalized server detail from an error chain.
///
/// Returns `Some` only when the failure was a [`RollcallError::Remote`];
/// flows use this to surface the server's own message and fall back to a
/// generic one for everything else.
pub fn remote_detail(err: &anyhow::Error) -> Option<&str> {
    match err.downcast_ref::<RollcallError>() {
        Some(RollcallError::Remote { detail, .. }) => Some(detail.as_str()),
        _ => None,
    }
}

/// Like [`remote_detail`], but only for failures the server actually
/// answered. Transport failures carry a client-side message rather than a
/// server one, and the auth flows replace those with their own wording.
pub fn server_detail(err: &anyhow::Error) -> Option<&str> {
    match err.downcast_ref::<RollcallError>() {
        Some(RollcallError::Remote { category, detail })
            if *category != StatusCategory::Transport =>
        {
            Some(detail.as_str())
        }
        _ => None,
    }
}
