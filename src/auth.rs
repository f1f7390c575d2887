//! Account flows: register, login, password reset, logout
//!
//! Each flow validates its form locally, calls the auth gateway, and maps
//! the result onto an [`AuthOutcome`] the caller can render. Server
//! rejections surface the server's own detail message; failures with no
//! server response fall back to a per-flow generic notice.

use std::sync::Arc;

use crate::api::AuthClient;
use crate::error::{server_detail, Result};
use crate::forms::{FieldErrors, LoginForm, RegisterForm};
use crate::session::SessionStore;

/// Screen the caller should move to after a successful flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Back to the login screen (after registering or resetting a password).
    Login,
    /// Into the authenticated area.
    Dashboard,
}

/// Result of running one account flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Local validation failed; nothing was sent to the server.
    Invalid(FieldErrors),
    /// The flow completed. `route` is `None` for flows that stay in place.
    Success {
        notice: String,
        route: Option<Route>,
    },
    /// The server rejected the request, or it never got through.
    Rejected { detail: String },
}

/// Drives the account flows against the auth gateway and session store.
pub struct AuthFlow {
    client: AuthClient,
    session: Arc<SessionStore>,
}

impl AuthFlow {
    pub fn new(client: AuthClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Registers a new account. On success the caller is routed back to
    /// login; registering never signs the user in by itself.
    pub async fn register(&self, form: &RegisterForm) -> Result<AuthOutcome> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Ok(AuthOutcome::Invalid(errors));
        }

        match self
            .client
            .register(
                &form.username,
                &form.email,
                &form.password,
                &form.confirm_password,
            )
            .await
        {
            Ok(message) => {
                tracing::info!(username = %form.username, "registered account");
                Ok(AuthOutcome::Success {
                    notice: message,
                    route: Some(Route::Login),
                })
            }
            Err(err) => Ok(rejected(&err, "Registration failed")),
        }
    }

    /// Signs in and stores the issued token. With `remember` the token
    /// goes to the durable scope and survives restarts; otherwise it
    /// lives only for the current process.
    pub async fn login(&self, form: &LoginForm, remember: bool) -> Result<AuthOutcome> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Ok(AuthOutcome::Invalid(errors));
        }

        match self.client.login(&form.email, &form.password).await {
            Ok(token) => {
                self.session.login(&token, remember)?;
                tracing::info!(remember, "signed in");
                Ok(AuthOutcome::Success {
                    notice: "Login successful!".to_string(),
                    route: Some(Route::Dashboard),
                })
            }
            Err(err) => Ok(rejected(&err, "Login failed")),
        }
    }

    /// Asks the server to send a reset link. No local validation: the
    /// server answers generically either way so addresses cannot be
    /// probed, and an empty input gets the same generic acknowledgement.
    pub async fn request_reset(&self, email: &str) -> Result<AuthOutcome> {
        match self.client.request_reset(email).await {
            Ok(detail) => Ok(AuthOutcome::Success {
                notice: detail.unwrap_or_else(|| "Reset link sent!".to_string()),
                route: None,
            }),
            Err(err) => Ok(rejected(&err, "Failed to send reset link")),
        }
    }

    /// Completes a password reset with the token from the emailed link.
    pub async fn confirm_reset(
        &self,
        token: Option<&str>,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<AuthOutcome> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => {
                let mut errors = FieldErrors::new();
                errors.add("token", "Invalid or missing token");
                return Ok(AuthOutcome::Invalid(errors));
            }
        };

        if new_password != confirm_password {
            let mut errors = FieldErrors::new();
            errors.add("confirm_password", "Passwords do not match");
            return Ok(AuthOutcome::Invalid(errors));
        }

        match self.client.confirm_reset(token, new_password).await {
            Ok(message) => Ok(AuthOutcome::Success {
                notice: message.unwrap_or_else(|| "Password has been reset".to_string()),
                route: Some(Route::Login),
            }),
            Err(err) => Ok(rejected(&err, "Failed to reset password")),
        }
    }

    /// Clears the stored token from both scopes.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }
}

fn rejected(err: &anyhow::Error, fallback: &str) -> AuthOutcome {
    let detail = server_detail(err)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string());
    tracing::debug!(%detail, "auth flow rejected");
    AuthOutcome::Rejected { detail }
}
