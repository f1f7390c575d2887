//! Test utilities for rollcall
//!
//! This module provides common test helpers: in-memory session stores,
//! command contexts wired to throwaway servers, and bearer-token builders.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::api::{AuthClient, RegistryClient};
use crate::auth::AuthFlow;
use crate::catalog::Catalog;
use crate::commands::AppContext;
use crate::config::ServerConfig;
use crate::roster::RosterBoard;
use crate::session::{MemoryScope, SessionStore};

/// Create a session store backed by two in-memory scopes
///
/// # Returns
///
/// Returns a store that never touches the system keyring
pub fn memory_session() -> Arc<SessionStore> {
    Arc::new(SessionStore::with_scopes(
        Box::new(MemoryScope::new()),
        Box::new(MemoryScope::new()),
    ))
}

/// Server config pointing at a closed port
///
/// Requests against it fail fast, which keeps tests that only exercise
/// local logic from hanging on an accidental network call.
pub fn dead_server() -> ServerConfig {
    server_at("http://127.0.0.1:1")
}

/// Server config pointing at the given base URL with a short timeout
pub fn server_at(base_url: &str) -> ServerConfig {
    ServerConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 1,
    }
}

/// Create a command context with in-memory session scopes
///
/// # Arguments
///
/// * `server` - Server the gateways should talk to
///
/// # Panics
///
/// Panics if HTTP client initialization fails
pub fn context_at(server: &ServerConfig) -> AppContext {
    let session = memory_session();
    let auth_client = AuthClient::new(server).expect("Failed to build auth client");
    let registry =
        RegistryClient::new(server, Arc::clone(&session)).expect("Failed to build registry client");
    let board = RosterBoard::new(registry.clone(), Catalog::default());

    AppContext {
        flow: AuthFlow::new(auth_client, Arc::clone(&session)),
        registry,
        board,
        session,
    }
}

/// Build a syntactically valid unsigned bearer token
///
/// Only the payload segment matters to the claim decoder; the signature
/// is never checked client-side.
///
/// # Arguments
///
/// * `claims` - JSON value to encode as the token payload
pub fn bearer_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{}.{}.unsigned", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_session_starts_empty() {
        let session = memory_session();
        assert_eq!(session.token().unwrap(), None);
    }

    #[test]
    fn test_context_at_builds() {
        let ctx = context_at(&dead_server());
        assert_eq!(ctx.session.token().unwrap(), None);
    }

    #[test]
    fn test_bearer_token_decodes() {
        let token = bearer_token(&json!({"sub": "ada@example.edu", "name": "Ada"}));
        let claims = crate::session::decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("ada@example.edu"));
        assert_eq!(claims.name.as_deref(), Some("Ada"));
    }
}
