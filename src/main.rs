//! Taskdeck - command-line client for the Taskdeck task-management service
//!
//! Main entry point for the Taskdeck CLI.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskdeck::cli::{Cli, Commands};
use taskdeck::commands;
use taskdeck::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Register { email, password } => {
            tracing::debug!("Registering account for {}", email);
            commands::auth::register(&config, &email, password).await
        }
        Commands::Login { email, password } => {
            tracing::debug!("Logging in as {}", email);
            commands::auth::login(&config, &email, password).await
        }
        Commands::Logout => {
            tracing::debug!("Logging out");
            commands::auth::logout(&config).await
        }
        Commands::Whoami { json } => commands::auth::whoami(&config, json).await,
        Commands::List { json } => commands::todos::list(&config, json).await,
        Commands::Add {
            title,
            description,
            priority,
            tags,
        } => commands::todos::add(&config, &title, description, priority, tags).await,
        Commands::Show { id, json } => commands::todos::show(&config, id, json).await,
        Commands::Edit {
            id,
            title,
            description,
            completed,
            priority,
            tags,
        } => {
            commands::todos::edit(&config, id, title, description, completed, priority, tags)
                .await
        }
        Commands::Toggle { id } => commands::todos::toggle(&config, id).await,
        Commands::Delete { id, yes } => commands::todos::delete(&config, id, yes).await,
        Commands::Chat {
            message,
            conversation,
        } => {
            tracing::debug!("Starting assistant chat");
            commands::chat::run_chat(&config, message, conversation).await
        }
        Commands::Theme { mode } => commands::theme::run_theme(&config, mode),
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "taskdeck=debug"
    } else {
        "taskdeck=info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
