//! Rollcall - student records client
//!
#![doc = "Rollcall - student records client"]
#![doc = "Main entry point for the rollcall application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rollcall::cli::{Cli, Commands, StudentCommand};
use rollcall::commands;
use rollcall::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Wire the shared clients once
    let ctx = commands::AppContext::from_config(&config)?;

    // Execute command
    match cli.command {
        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            tracing::info!("Starting account registration");
            commands::auth::register(&ctx, username, email, password, confirm_password).await?;
            Ok(())
        }
        Commands::Login {
            email,
            password,
            remember,
        } => {
            tracing::info!("Starting login");
            if remember {
                tracing::debug!("Token will be stored durably");
            }
            commands::auth::login(&ctx, email, password, remember).await?;
            Ok(())
        }
        Commands::Logout => {
            tracing::info!("Clearing session");
            commands::auth::logout(&ctx)?;
            Ok(())
        }
        Commands::Whoami => {
            commands::auth::whoami(&ctx)?;
            Ok(())
        }
        Commands::ForgotPassword { email } => {
            tracing::info!("Requesting password reset");
            commands::auth::forgot_password(&ctx, email).await?;
            Ok(())
        }
        Commands::ResetPassword {
            token,
            password,
            confirm_password,
        } => {
            tracing::info!("Confirming password reset");
            commands::auth::reset_password(&ctx, token, password, confirm_password).await?;
            Ok(())
        }
        Commands::Students { command } => match command {
            StudentCommand::List { course } => {
                tracing::info!("Listing students");
                commands::students::list(&ctx, course).await?;
                Ok(())
            }
            StudentCommand::Add {
                id,
                name,
                age,
                courses,
                email,
                phone,
            } => {
                tracing::info!("Adding a student");
                commands::students::add(&ctx, id, name, age, courses, email, phone).await?;
                Ok(())
            }
            StudentCommand::Grade { id, course, grade } => {
                tracing::info!("Updating a grade");
                commands::students::grade(&ctx, id, course, grade).await?;
                Ok(())
            }
            StudentCommand::Delete { id, yes } => {
                tracing::info!("Deleting a student");
                commands::students::delete(&ctx, id, yes).await?;
                Ok(())
            }
            StudentCommand::Show { id } => {
                commands::students::show(&ctx, id).await?;
                Ok(())
            }
            StudentCommand::Enrolled { course } => {
                commands::students::enrolled(&ctx, &course).await?;
                Ok(())
            }
        },
        Commands::Health => {
            commands::students::health(&ctx).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rollcall=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
