/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `auth`     — Account flows and session inspection
- `students` — Roster management and the server health probe

These handlers are intentionally small and use the library components:
the gateways, the session store, and the roster board.
*/

use std::sync::Arc;

use crate::api::{AuthClient, RegistryClient};
use crate::auth::AuthFlow;
use crate::config::Config;
use crate::error::Result;
use crate::roster::RosterBoard;
use crate::session::SessionStore;

// Account flow handlers
pub mod auth;

// Roster handlers
pub mod students;

/// Clients and state shared by the command handlers, built once per run.
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub flow: AuthFlow,
    pub registry: RegistryClient,
    pub board: RosterBoard,
}

impl AppContext {
    /// Wire the session store, gateways, and roster board from config.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn from_config(config: &Config) -> Result<Self> {
        let session = Arc::new(SessionStore::new(&config.session));
        let auth_client = AuthClient::new(&config.server)?;
        let registry = RegistryClient::new(&config.server, Arc::clone(&session))?;
        let board = RosterBoard::new(registry.clone(), config.catalog.clone());

        Ok(Self {
            flow: AuthFlow::new(auth_client, Arc::clone(&session)),
            registry,
            board,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_context_from_default_config() {
        let config = Config::default();
        let ctx = AppContext::from_config(&config);
        assert!(ctx.is_ok());
    }
}
