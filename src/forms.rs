//! Client-side validation for the account forms
//!
//! These checks run before anything touches the network, so the user gets
//! immediate per-field feedback. The server applies its own stricter
//! rules afterwards; passing here is necessary, not sufficient.

use std::sync::OnceLock;

use regex::Regex;

/// Per-field validation failures, in the order the form lists its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push((field.into(), message.into()));
    }

    /// The message recorded for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("hardcoded email pattern"))
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !email_regex().is_match(email) {
        errors.add("email", "Please enter a valid email address");
    }
}

/// Input to the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Runs the registration form's field checks.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.username.trim().is_empty() {
            errors.add("username", "Username is required");
        }

        check_email(&self.email, &mut errors);

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < 6 {
            errors.add("password", "Password must be at least 6 characters long");
        }

        if self.confirm_password.is_empty() {
            errors.add("confirm_password", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }

        errors
    }
}

/// Input to the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Runs the login form's field checks.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        check_email(&self.email, &mut errors);

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }

        errors
    }
}
