//! Unverified bearer-token claim decoding
//!
//! The server signs its tokens as JWTs, but the client has no key and no
//! business verifying them. It only peeks at the payload segment to find
//! out who is logged in for display purposes. The server remains the
//! authority on whether the token is actually valid.

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use crate::error::{Result, RollcallError};

/// Claims the client cares about from the token payload.
///
/// Anything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Subject, the account's email address
    #[serde(default)]
    pub sub: Option<String>,

    /// Display name chosen at registration
    #[serde(default)]
    pub name: Option<String>,
}

/// Who is logged in, as far as the client can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account email, when the token carried one
    pub subject: Option<String>,

    /// Name to greet the user by, never empty
    pub display_name: String,
}

impl Claims {
    /// Collapses raw claims into a displayable identity.
    ///
    /// A missing or empty `name` claim falls back to "User".
    pub fn into_identity(self) -> Identity {
        let display_name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => "User".to_string(),
        };
        Identity {
            subject: self.sub,
            display_name,
        }
    }
}

/// Decodes the payload segment of a bearer token without verifying it.
///
/// Requires exactly three dot-separated segments, base64url-decodes the
/// middle one, and parses it as JSON. Any structural problem (wrong
/// segment count, bad base64, non-JSON payload) is reported as a session
/// error; callers treat such a token as corrupt and discard it.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(RollcallError::Session(
            "token is not three dot-separated segments".to_string(),
        )
        .into());
    }

    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|e| RollcallError::Session(format!("token payload is not base64url: {}", e)))?;

    let claims = serde_json::from_slice(&bytes)
        .map_err(|e| RollcallError::Session(format!("token payload is not valid JSON: {}", e)))?;

    Ok(claims)
}
