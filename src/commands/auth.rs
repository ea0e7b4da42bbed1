//! Authentication commands: register, login, logout, whoami.

use crate::commands::{build_client, build_store, prompt_line};
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use crate::types::User;

use colored::Colorize;

/// Register a new account and log in.
pub async fn register(config: &Config, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(email, password)?;

    let store = build_store(config)?;
    let client = build_client(config, store.clone())?;
    let mut session = Session::new(client, store);

    match session.register(email, &password).await {
        Ok(user) => {
            println!("{}", format!("Registered and logged in as {}", user.email).green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("Registration failed: {}", e).red());
            Err(e)
        }
    }
}

/// Log in to the service.
pub async fn login(config: &Config, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(email, password)?;

    let store = build_store(config)?;
    let client = build_client(config, store.clone())?;
    let mut session = Session::new(client, store);

    match session.login(email, &password).await {
        Ok(user) => {
            println!("{}", format!("Logged in as {}", user.email).green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("Login failed: {}", e).red());
            Err(e)
        }
    }
}

/// Log out and clear the stored credential.
pub async fn logout(config: &Config) -> Result<()> {
    let store = build_store(config)?;
    let client = build_client(config, store.clone())?;
    let mut session = Session::new(client, store);

    session.logout().await?;
    println!("{}", "Logged out".green());
    Ok(())
}

/// Show the current identity.
///
/// When logged in, the authoritative identity is fetched from the server
/// and the cached snapshot refreshed; if the server is unreachable the
/// cached snapshot is shown instead, marked as such.
pub async fn whoami(config: &Config, json: bool) -> Result<()> {
    let store = build_store(config)?;
    let client = build_client(config, store.clone())?;
    let mut session = Session::new(client, store);

    if !session.is_authenticated() {
        println!("{}", "Not logged in".yellow());
        return Ok(());
    }

    match session.refresh_identity().await {
        Ok(user) => print_user(&user, json, None),
        Err(e) => {
            tracing::warn!("Could not verify identity with server: {}", e);
            let note = cached_note(&e);
            // current_user is Some here; checked above and refresh failure
            // leaves the cached identity in place.
            let user = session.current_user().cloned();
            match user {
                Some(user) => print_user(&user, json, Some(note)),
                None => println!("{}", "Not logged in".yellow()),
            }
        }
    }

    Ok(())
}

/// What to say under a cached identity when the server could not confirm
/// it: a rejected credential calls for a re-login, anything else is a
/// connectivity problem.
fn cached_note(e: &anyhow::Error) -> &'static str {
    match e.downcast_ref::<crate::error::TaskdeckError>() {
        Some(crate::error::TaskdeckError::Api { .. }) => {
            "(cached identity; server rejected the credential, run `taskdeck login` again)"
        }
        _ => "(cached identity; server unreachable)",
    }
}

fn print_user(user: &User, json: bool, note: Option<&str>) {
    if json {
        match serde_json::to_string_pretty(user) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => tracing::error!("Failed to render identity: {}", e),
        }
        return;
    }

    println!("{} (id {})", user.email.bold(), user.id);
    if let Some(created) = user.created_at {
        println!("Member since {}", created.format("%Y-%m-%d"));
    }
    if let Some(note) = note {
        println!("{}", note.yellow());
    }
}

fn resolve_password(email: &str, password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => prompt_line(&format!("Password for {}: ", email)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskdeckError;

    #[test]
    fn test_cached_note_suggests_relogin_on_server_rejection() {
        let err: anyhow::Error = TaskdeckError::Api {
            code: "UNAUTHORIZED".to_string(),
            message: "Token expired".to_string(),
            details: serde_json::json!({}),
        }
        .into();
        assert!(cached_note(&err).contains("taskdeck login"));
    }

    #[test]
    fn test_cached_note_reports_unreachable_on_transport_failure() {
        let err: anyhow::Error =
            TaskdeckError::Network("connection refused".to_string()).into();
        assert!(cached_note(&err).contains("unreachable"));
    }
}
