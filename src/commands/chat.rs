//! Assistant chat command.
//!
//! The natural-language work happens server-side; this handler only sends
//! messages to the assistant endpoint and threads the conversation id
//! across turns.

use crate::commands::{build_client, build_store};
use crate::config::Config;
use crate::error::{Result, TaskdeckError};
use crate::session::Session;
use crate::types::ChatRequest;

use colored::Colorize;
use rustyline::error::ReadlineError;

/// Run the chat command: one-shot when `message` is given, otherwise an
/// interactive session.
pub async fn run_chat(
    config: &Config,
    message: Option<String>,
    conversation: Option<i64>,
) -> Result<()> {
    let store = build_store(config)?;
    let client = build_client(config, store.clone())?;
    let session = Session::new(client.clone(), store);

    let user_id = match session.current_user() {
        Some(user) => user.id,
        None => return Err(TaskdeckError::NotAuthenticated.into()),
    };

    match message {
        Some(message) => {
            let reply = client
                .chat(
                    user_id,
                    &ChatRequest {
                        conversation_id: conversation,
                        message,
                    },
                )
                .await?;
            print_reply(&reply.response, &reply.tool_calls);
            Ok(())
        }
        None => interactive_loop(&client, user_id, conversation).await,
    }
}

async fn interactive_loop(
    client: &crate::client::ApiClient,
    user_id: i64,
    mut conversation: Option<i64>,
) -> Result<()> {
    println!(
        "{}",
        "Talk to the task assistant. Type 'exit' or press Ctrl-D to leave.".dimmed()
    );

    let mut editor = rustyline::DefaultEditor::new()?;

    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        if line.is_empty() {
            continue;
        }
        if matches!(line.as_str(), "exit" | "quit") {
            break;
        }

        let _ = editor.add_history_entry(&line);

        let request = ChatRequest {
            conversation_id: conversation,
            message: line,
        };

        match client.chat(user_id, &request).await {
            Ok(reply) => {
                conversation = Some(reply.conversation_id);
                print_reply(&reply.response, &reply.tool_calls);
            }
            Err(e) => {
                // Keep the session alive; the user can retry.
                eprintln!("{}", format!("assistant error: {}", e).red());
            }
        }
    }

    Ok(())
}

fn print_reply(response: &str, tool_calls: &[serde_json::Value]) {
    println!("{} {}", "assistant>".cyan().bold(), response);

    for call in tool_calls {
        let name = call
            .get("tool")
            .or_else(|| call.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or("tool");
        println!("{}", format!("  [{}]", name).dimmed());
    }
}
