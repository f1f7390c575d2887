//! Session storage and lifecycle
//!
//! A session is a bearer token held in exactly one of two scopes: the
//! durable scope (OS keyring, survives restarts, for "remember me"
//! logins) or the ephemeral scope (process memory, gone on exit). The
//! durable scope always wins when both somehow hold a token.

pub mod claims;
pub mod scope;

pub use claims::{decode_claims, Claims, Identity};
pub use scope::{KeyringScope, MemoryScope, TokenScope};

use crate::config::SessionConfig;
use crate::error::Result;

/// Outcome of a session check before entering an authenticated area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// A usable session exists; proceed as this identity.
    Open(Identity),
    /// No usable session; the caller should send the user to login.
    RedirectToLogin,
}

/// Holds the session token across the two scopes and answers the
/// "who is logged in" question.
pub struct SessionStore {
    durable: Box<dyn TokenScope>,
    ephemeral: Box<dyn TokenScope>,
}

impl SessionStore {
    /// Builds the production store: keyring-backed durable scope plus an
    /// in-process ephemeral scope.
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_scopes(
            Box::new(KeyringScope::new(&config.service)),
            Box::new(MemoryScope::new()),
        )
    }

    /// Builds a store over explicit scopes. Tests use memory for both.
    pub fn with_scopes(durable: Box<dyn TokenScope>, ephemeral: Box<dyn TokenScope>) -> Self {
        Self { durable, ephemeral }
    }

    /// Records a fresh login.
    ///
    /// The token lands in exactly one scope, chosen by `remember`, and the
    /// other scope is cleared so a stale token from a previous session
    /// cannot shadow this one.
    pub fn login(&self, token: &str, remember: bool) -> Result<()> {
        if remember {
            self.durable.store(token)?;
            self.ephemeral.clear()?;
        } else {
            self.ephemeral.store(token)?;
            self.durable.clear()?;
        }
        tracing::debug!(remember, "Stored session token");
        Ok(())
    }

    /// Ends the session by clearing both scopes. Idempotent.
    pub fn logout(&self) -> Result<()> {
        self.durable.clear()?;
        self.ephemeral.clear()?;
        tracing::debug!("Cleared session token");
        Ok(())
    }

    /// The current bearer token, durable scope first.
    pub fn token(&self) -> Result<Option<String>> {
        if let Some(token) = self.durable.load()? {
            return Ok(Some(token));
        }
        self.ephemeral.load()
    }

    /// Decodes the current token into an identity.
    ///
    /// Returns `Ok(None)` when no token is stored. A token that cannot be
    /// decoded is treated as corrupt: both scopes are cleared and `None`
    /// is returned, so the user lands back at login instead of looping on
    /// a broken session.
    pub fn current_identity(&self) -> Result<Option<Identity>> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };

        match decode_claims(&token) {
            Ok(claims) => Ok(Some(claims.into_identity())),
            Err(e) => {
                tracing::warn!("Discarding undecodable session token: {}", e);
                self.logout()?;
                Ok(None)
            }
        }
    }

    /// Checks the session before an authenticated operation.
    pub fn guard(&self) -> Result<Gate> {
        match self.current_identity()? {
            Some(identity) => Ok(Gate::Open(identity)),
            None => {
                tracing::debug!("No usable session, redirecting to login");
                Ok(Gate::RedirectToLogin)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose, Engine as _};

    fn memory_store() -> SessionStore {
        SessionStore::with_scopes(Box::new(MemoryScope::new()), Box::new(MemoryScope::new()))
    }

    fn make_token(claims_json: &str) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(claims_json);
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_login_remembered_uses_durable_scope_only() {
        let store = memory_store();
        store.login("tok_durable", true).unwrap();

        assert_eq!(store.durable.load().unwrap().as_deref(), Some("tok_durable"));
        assert!(store.ephemeral.load().unwrap().is_none());
    }

    #[test]
    fn test_login_unremembered_uses_ephemeral_scope_only() {
        let store = memory_store();
        store.login("tok_ephemeral", false).unwrap();

        assert!(store.durable.load().unwrap().is_none());
        assert_eq!(
            store.ephemeral.load().unwrap().as_deref(),
            Some("tok_ephemeral")
        );
    }

    #[test]
    fn test_login_remembered_evicts_stale_ephemeral_token() {
        let store = memory_store();
        store.login("old_session", false).unwrap();
        store.login("new_session", true).unwrap();

        assert!(store.ephemeral.load().unwrap().is_none());
        assert_eq!(store.token().unwrap().as_deref(), Some("new_session"));
    }

    #[test]
    fn test_login_unremembered_evicts_stale_durable_token() {
        let store = memory_store();
        store.login("old_session", true).unwrap();
        store.login("new_session", false).unwrap();

        assert!(store.durable.load().unwrap().is_none());
        assert_eq!(store.token().unwrap().as_deref(), Some("new_session"));
    }

    #[test]
    fn test_token_prefers_durable_scope() {
        let store = memory_store();
        store.durable.store("durable_tok").unwrap();
        store.ephemeral.store("ephemeral_tok").unwrap();

        assert_eq!(store.token().unwrap().as_deref(), Some("durable_tok"));
    }

    #[test]
    fn test_logout_clears_both_scopes() {
        let store = memory_store();
        store.durable.store("a").unwrap();
        store.ephemeral.store("b").unwrap();

        store.logout().unwrap();

        assert!(store.durable.load().unwrap().is_none());
        assert!(store.ephemeral.load().unwrap().is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let store = memory_store();
        store.logout().unwrap();
        store.logout().unwrap();
        assert!(store.token().unwrap().is_none());
    }

    #[test]
    fn test_current_identity_none_when_logged_out() {
        let store = memory_store();
        assert!(store.current_identity().unwrap().is_none());
    }

    #[test]
    fn test_current_identity_decodes_stored_token() {
        let store = memory_store();
        let token = make_token(r#"{"sub":"ada@example.edu","name":"Ada"}"#);
        store.login(&token, true).unwrap();

        let identity = store.current_identity().unwrap().unwrap();
        assert_eq!(identity.display_name, "Ada");
        assert_eq!(identity.subject.as_deref(), Some("ada@example.edu"));
    }

    #[test]
    fn test_corrupt_token_clears_both_scopes() {
        let store = memory_store();
        store.durable.store("garbage").unwrap();
        store.ephemeral.store("more garbage").unwrap();

        assert!(store.current_identity().unwrap().is_none());
        assert!(store.durable.load().unwrap().is_none());
        assert!(store.ephemeral.load().unwrap().is_none());
    }

    #[test]
    fn test_guard_open_with_session() {
        let store = memory_store();
        let token = make_token(r#"{"sub":"ada@example.edu","name":"Ada"}"#);
        store.login(&token, false).unwrap();

        match store.guard().unwrap() {
            Gate::Open(identity) => assert_eq!(identity.display_name, "Ada"),
            Gate::RedirectToLogin => panic!("expected open gate"),
        }
    }

    #[test]
    fn test_guard_redirects_without_session() {
        let store = memory_store();
        assert_eq!(store.guard().unwrap(), Gate::RedirectToLogin);
    }
}
