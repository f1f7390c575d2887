//! HTTP gateways to the student-records server
//!
//! Two route families live on the same server: `/auth` for account
//! operations and `/api` for the student registry. Each gets its own
//! client, but they share the request plumbing here: client construction,
//! URL joining, and the normalization of failed responses into
//! [`RollcallError::Remote`] values whose detail strings are fit to show
//! to the user.

pub mod auth;
pub mod registry;

pub use auth::AuthClient;
pub use registry::{Contact, CourseGrade, RegistryClient, Student};

use std::time::Duration;

use crate::error::{Result, RollcallError, StatusCategory};

/// Builds the HTTP client both gateways use.
pub(crate) fn http_client(timeout_seconds: u64) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("rollcall/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(RollcallError::Http)?;
    Ok(client)
}

/// Joins a base URL and a path without doubling the slash between them.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Maps a request that never produced a response onto a remote error.
pub(crate) fn transport_error(e: reqwest::Error) -> RollcallError {
    tracing::warn!("Request failed before a response arrived: {}", e);
    RollcallError::remote(StatusCategory::Transport, e.to_string())
}

/// Maps an undecodable success body onto a remote error.
pub(crate) fn decode_error(e: reqwest::Error) -> RollcallError {
    tracing::warn!("Failed to parse server response: {}", e);
    RollcallError::remote(
        StatusCategory::Transport,
        format!("Failed to parse server response: {}", e),
    )
}

/// Consumes a non-success response and produces the normalized error.
pub(crate) async fn read_error(response: reqwest::Response) -> RollcallError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Server returned error {}: {}", status, body);
    RollcallError::remote(
        StatusCategory::from_status(status),
        normalize_detail(status, &body),
    )
}

/// Extracts a human-readable detail string from an error response body.
///
/// The server reports failures as `{"detail": ...}` where detail is either
/// a plain string or a list of per-field validation entries. A list is
/// joined into one string in server order. Anything else falls back to the
/// raw body, then to the status line.
fn normalize_detail(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(serde_json::Value::Array(entries)) => {
                let msgs: Vec<String> = entries
                    .iter()
                    .map(|entry| match entry.get("msg").and_then(|m| m.as_str()) {
                        Some(msg) => msg.to_string(),
                        None => entry.to_string(),
                    })
                    .collect();
                if !msgs.is_empty() {
                    return msgs.join(", ");
                }
            }
            _ => {}
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
