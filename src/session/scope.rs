//! Token scopes: where a session token lives
//!
//! A scope is a single slot that can hold at most one bearer token. Two
//! implementations exist: [`KeyringScope`] persists the token in the OS
//! native credential store (Keychain on macOS, Secret Service on Linux,
//! Windows Credential Manager on Windows) so it survives process restarts,
//! and [`MemoryScope`] holds it for the lifetime of the process only.

use std::sync::Mutex;

use crate::error::{Result, RollcallError};

/// Keyring entry user under which the token is stored.
const TOKEN_USER: &str = "token";

/// A single storage slot for the session token.
///
/// All operations are idempotent: storing overwrites, clearing an empty
/// scope succeeds, and loading an empty scope returns `Ok(None)` so that
/// callers can distinguish "not logged in" from a genuine storage error.
pub trait TokenScope: Send + Sync {
    /// Reads the token currently held by this scope, if any.
    fn load(&self) -> Result<Option<String>>;

    /// Writes a token into this scope, replacing any previous one.
    fn store(&self, token: &str) -> Result<()>;

    /// Removes the token from this scope. No-op when the scope is empty.
    fn clear(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// KeyringScope
// ---------------------------------------------------------------------------

/// Durable scope backed by the OS native keyring.
///
/// The token is stored under the configured service name so that separate
/// deployments (e.g. staging vs production) can coexist on one machine.
///
/// # Examples
///
/// ```no_run
/// use rollcall::session::scope::{KeyringScope, TokenScope};
///
/// # fn example() -> rollcall::error::Result<()> {
/// let scope = KeyringScope::new("rollcall");
/// scope.store("my_token")?;
/// assert!(scope.load()?.is_some());
/// scope.clear()?;
/// # Ok(())
/// # }
/// ```
pub struct KeyringScope {
    service: String,
}

impl KeyringScope {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, TOKEN_USER)
            .map_err(|e| RollcallError::Keyring(e).into())
    }
}

impl TokenScope for KeyringScope {
    /// Loads the stored token.
    ///
    /// Returns `Ok(None)` when no token has been saved, allowing callers to
    /// distinguish between "not logged in yet" and a genuine keyring error.
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(RollcallError::Keyring(e).into()),
        }
    }

    fn store(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(RollcallError::Keyring)?;
        Ok(())
    }

    /// Deletes the stored token.
    ///
    /// Safe to call even when no token was previously saved.
    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(RollcallError::Keyring(e).into()),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryScope
// ---------------------------------------------------------------------------

/// Ephemeral scope that lives only as long as the process.
///
/// Used for sessions the user did not ask to remember, and by tests as a
/// stand-in for the keyring.
#[derive(Default)]
pub struct MemoryScope {
    slot: Mutex<Option<String>>,
}

impl MemoryScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| RollcallError::Session("ephemeral scope lock poisoned".to_string()).into())
    }
}

impl TokenScope for MemoryScope {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
