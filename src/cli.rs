//! Command-line interface definition for rollcall
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for account management and the student roster.

use clap::{Parser, Subcommand};

/// Rollcall - student records client
///
/// Manage accounts and the student roster of a records server
/// from the command line.
#[derive(Parser, Debug, Clone)]
#[command(name = "rollcall")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the server base URL from config
    #[arg(short, long)]
    pub server: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for rollcall
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new account
    Register {
        /// Username for the new account
        #[arg(short, long)]
        username: Option<String>,

        /// Email address for the new account
        #[arg(short, long)]
        email: Option<String>,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: Option<String>,

        /// Repeat of the password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Sign in and store the session token
    Login {
        /// Email address of the account
        #[arg(short, long)]
        email: Option<String>,

        /// Account password
        #[arg(short, long)]
        password: Option<String>,

        /// Keep the session across restarts (stores the token in the
        /// system keyring instead of only this process)
        #[arg(short, long)]
        remember: bool,
    },

    /// Clear the stored session token
    Logout,

    /// Show who is currently signed in
    Whoami,

    /// Request a password reset link by email
    ForgotPassword {
        /// Email address of the account
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Set a new password using a reset token
    ResetPassword {
        /// Reset token from the emailed link
        #[arg(short, long)]
        token: Option<String>,

        /// New password (at least 6 characters)
        #[arg(short, long)]
        password: Option<String>,

        /// Repeat of the new password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Manage the student roster
    Students {
        /// Roster subcommand
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Check that the records server is reachable
    Health,
}

/// Roster subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum StudentCommand {
    /// List students, optionally filtered by course code
    List {
        /// Only show students enrolled in this course code
        #[arg(short, long)]
        course: Option<String>,
    },

    /// Add a student to the roster
    Add {
        /// Numeric student id
        #[arg(short, long)]
        id: Option<String>,

        /// Full name
        #[arg(short, long)]
        name: Option<String>,

        /// Age in years
        #[arg(short, long)]
        age: Option<String>,

        /// Course enrollment as CODE or CODE:GRADE (repeatable)
        #[arg(short = 'C', long = "course", value_name = "CODE[:GRADE]")]
        courses: Vec<String>,

        /// Contact email
        #[arg(short, long)]
        email: Option<String>,

        /// Contact phone number
        #[arg(short, long)]
        phone: Option<String>,
    },

    /// Update a student's grade in one course
    Grade {
        /// Numeric student id
        #[arg(short, long)]
        id: u32,

        /// Course code to grade
        #[arg(short, long)]
        course: Option<String>,

        /// New grade value
        #[arg(short, long)]
        grade: Option<String>,
    },

    /// Remove a student from the roster
    Delete {
        /// Numeric student id
        #[arg(short, long)]
        id: u32,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show one student's full record
    Show {
        /// Numeric student id
        #[arg(short, long)]
        id: u32,
    },

    /// List students enrolled in a course
    Enrolled {
        /// Course code to look up
        #[arg(short, long)]
        course: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            server: None,
            command: Commands::Health,
        }
    }
}
