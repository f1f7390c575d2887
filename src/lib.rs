//! Rollcall - student records client library
//!
//! This library provides the core functionality for the rollcall client,
//! including the auth and registry gateways, session storage, form
//! validation, and the roster board.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: HTTP gateways for the auth and student registry endpoints
//! - `auth`: Account flows built on the auth gateway and session store
//! - `session`: Token scopes, claim decoding, and the session store
//! - `roster`: Roster board state, forms, and notices
//! - `catalog`: The course catalog offered at enrollment
//! - `forms`: Client-side validation for the account forms
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use rollcall::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     // Client usage would go here
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod roster;
pub mod session;

// Re-export commonly used types
pub use api::{AuthClient, RegistryClient, Student};
pub use auth::{AuthFlow, AuthOutcome, Route};
pub use config::Config;
pub use error::{Result, RollcallError, StatusCategory};
pub use roster::RosterBoard;
pub use session::SessionStore;

#[cfg(test)]
pub mod test_utils;
