//! Account command handlers
//!
//! Register, login, logout, whoami, and the password-reset pair. Success
//! notices print in green; failures print in red and the process exits
//! non-zero.

use colored::Colorize;

use crate::auth::AuthOutcome;
use crate::commands::AppContext;
use crate::error::{Result, RollcallError};
use crate::forms::{LoginForm, RegisterForm};
use crate::session::Gate;

/// Register a new account
///
/// # Arguments
///
/// * `ctx` - Shared command context
/// * `username`, `email`, `password`, `confirm_password` - Form fields;
///   missing flags become empty fields and fail validation
pub async fn register(
    ctx: &AppContext,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
) -> Result<()> {
    let form = RegisterForm {
        username: username.unwrap_or_default(),
        email: email.unwrap_or_default(),
        password: password.unwrap_or_default(),
        confirm_password: confirm_password.unwrap_or_default(),
    };

    finish(ctx.flow.register(&form).await?)
}

/// Sign in and store the session token
pub async fn login(
    ctx: &AppContext,
    email: Option<String>,
    password: Option<String>,
    remember: bool,
) -> Result<()> {
    let form = LoginForm {
        email: email.unwrap_or_default(),
        password: password.unwrap_or_default(),
    };

    let outcome = ctx.flow.login(&form, remember).await?;
    if remember && matches!(outcome, AuthOutcome::Success { .. }) {
        println!("Session stored in the system keyring.");
    }
    finish(outcome)
}

/// Clear the stored session token
pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.flow.logout()?;
    println!("{}", "Signed out.".green());
    Ok(())
}

/// Show the identity behind the stored session token
pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.session.guard()? {
        Gate::Open(identity) => {
            println!("Signed in as {}", identity.display_name);
            if let Some(subject) = identity.subject {
                println!("Subject: {}", subject);
            }
            Ok(())
        }
        Gate::RedirectToLogin => {
            println!("Not signed in. Run `rollcall login` first.");
            Ok(())
        }
    }
}

/// Ask the server to email a password reset link
pub async fn forgot_password(ctx: &AppContext, email: Option<String>) -> Result<()> {
    finish(ctx.flow.request_reset(&email.unwrap_or_default()).await?)
}

/// Set a new password using a reset token
pub async fn reset_password(
    ctx: &AppContext,
    token: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
) -> Result<()> {
    let password = password.unwrap_or_default();
    let confirm_password = confirm_password.unwrap_or_default();

    finish(
        ctx.flow
            .confirm_reset(token.as_deref(), &password, &confirm_password)
            .await?,
    )
}

/// Print an outcome; failed outcomes become errors so the exit status
/// reflects them.
fn finish(outcome: AuthOutcome) -> Result<()> {
    match outcome {
        AuthOutcome::Success { notice, .. } => {
            println!("{}", notice.green());
            Ok(())
        }
        AuthOutcome::Invalid(errors) => {
            for (_, message) in errors.iter() {
                eprintln!("{}", message.red());
            }
            Err(RollcallError::Rejected("invalid input".to_string()).into())
        }
        AuthOutcome::Rejected { detail } => {
            eprintln!("{}", detail.red());
            Err(RollcallError::Rejected(detail).into())
        }
    }
}
