//! Auth gateway for the `/auth` route family
//!
//! Wraps the four account endpoints: register, login, request a password
//! reset, and confirm a password reset. The server speaks PascalCase on
//! this family (`Username`, `AccessToken`, ...) while error bodies use a
//! lowercase `detail` field; the wire structs here absorb that split so
//! nothing above this module has to know about it.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::api::{decode_error, http_client, join_url, read_error, transport_error};
use crate::config::ServerConfig;
use crate::error::{Result, RollcallError, StatusCategory};

/// Client for the account endpoints.
///
/// # Examples
///
/// ```no_run
/// use rollcall::api::AuthClient;
/// use rollcall::config::ServerConfig;
///
/// # async fn example() -> rollcall::error::Result<()> {
/// let client = AuthClient::new(&ServerConfig::default())?;
/// let token = client.login("ada@example.edu", "hunter22").await?;
/// # Ok(())
/// # }
/// ```
pub struct AuthClient {
    client: Client,
    base_url: String,
}

/// Request body for POST /auth/register
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    confirm_password: &'a str,
}

/// Request body for POST /auth/login
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Request body for POST /auth/reset-password
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ResetRequest<'a> {
    email: &'a str,
}

/// Request body for POST /auth/confirm-reset
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmResetRequest<'a> {
    token: &'a str,
    new_password: &'a str,
    confirm_password: &'a str,
}

/// Response body shared by register and login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthResponse {
    #[serde(default)]
    message: String,
    #[serde(default)]
    access_token: Option<String>,
}

/// Success body of POST /auth/reset-password
#[derive(Debug, Deserialize)]
struct ResetRequestAck {
    #[serde(default)]
    detail: Option<String>,
}

/// Success body of POST /auth/confirm-reset
#[derive(Debug, Deserialize)]
struct ConfirmResetAck {
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

impl AuthClient {
    /// Create a new auth gateway for the configured server.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(server: &ServerConfig) -> Result<Self> {
        let client = http_client(server.timeout_seconds)?;
        Ok(Self {
            client,
            base_url: server.base_url.clone(),
        })
    }

    /// Registers a new account.
    ///
    /// Returns the server's acknowledgement message on success. The server
    /// enforces its own rules (duplicate email, password policy) and those
    /// rejections surface as remote errors with the server's detail.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<String> {
        let url = join_url(&self.base_url, "/auth/register");
        tracing::debug!("Registering account for {}", email);

        let response = self
            .client
            .post(&url)
            .json(&RegisterRequest {
                username,
                email,
                password,
                confirm_password,
            })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        let body: AuthResponse = response.json().await.map_err(decode_error)?;
        Ok(body.message)
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = join_url(&self.base_url, "/auth/login");
        tracing::debug!("Logging in {}", email);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        let body: AuthResponse = response.json().await.map_err(decode_error)?;
        body.access_token.ok_or_else(|| {
            RollcallError::remote(
                StatusCategory::Transport,
                "login response did not include a token",
            )
            .into()
        })
    }

    /// Asks the server to email a password-reset link.
    ///
    /// Returns the server's optional acknowledgement detail; callers apply
    /// their own wording when it is absent.
    pub async fn request_reset(&self, email: &str) -> Result<Option<String>> {
        let url = join_url(&self.base_url, "/auth/reset-password");
        tracing::debug!("Requesting password reset for {}", email);

        let response = self
            .client
            .post(&url)
            .json(&ResetRequest { email })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        let body: ResetRequestAck = response.json().await.map_err(decode_error)?;
        Ok(body.detail)
    }

    /// Sets a new password using an emailed reset token.
    ///
    /// The confirmation copy of the password is sent alongside the new one
    /// because the server re-checks the match.
    pub async fn confirm_reset(&self, token: &str, new_password: &str) -> Result<Option<String>> {
        let url = join_url(&self.base_url, "/auth/confirm-reset");
        tracing::debug!("Confirming password reset");

        let response = self
            .client
            .post(&url)
            .json(&ConfirmResetRequest {
                token,
                new_password,
                confirm_password: new_password,
            })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        let body: ConfirmResetAck = response.json().await.map_err(decode_error)?;
        Ok(body.message)
    }
}
