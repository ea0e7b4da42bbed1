//! Task commands: list, add, show, edit, toggle, delete.

use crate::commands::{build_client, build_store, prompt_line};
use crate::config::Config;
use crate::error::{Result, TaskdeckError};
use crate::todos::TodoStore;
use crate::types::{Priority, Todo, TodoDraft, TodoPatch};

use colored::Colorize;
use prettytable::{format, row, Table};

/// List all tasks, newest first per server order.
pub async fn list(config: &Config, json: bool) -> Result<()> {
    let mut store = make_store(config)?;
    let todos = store.fetch_all().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(todos)?);
        return Ok(());
    }

    if todos.is_empty() {
        println!("{}", "No tasks yet. Create one with `taskdeck add`.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["ID", "Done", "Pri", "Title", "Tags", "Updated"]);

    for todo in todos {
        table.add_row(row![
            todo.id,
            if todo.completed { "x" } else { "" },
            todo.priority,
            todo.title,
            todo.tags.as_deref().unwrap_or(""),
            todo.updated_at.format("%Y-%m-%d %H:%M"),
        ]);
    }

    table.printstd();
    Ok(())
}

/// Create a new task.
pub async fn add(
    config: &Config,
    title: &str,
    description: Option<String>,
    priority: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let priority = parse_priority(priority)?;

    let draft = TodoDraft {
        title: title.to_string(),
        description,
        priority: priority.unwrap_or_default(),
        tags,
    };

    let mut store = make_store(config)?;
    let todo = store.create(&draft).await?;

    println!(
        "{}",
        format!("Created task {} '{}'", todo.id, todo.title).green()
    );
    Ok(())
}

/// Show a single task.
pub async fn show(config: &Config, id: i64, json: bool) -> Result<()> {
    let mut store = make_store(config)?;
    let todo = store.get(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&todo)?);
        return Ok(());
    }

    print_todo(&todo);
    Ok(())
}

/// Edit fields of an existing task.
#[allow(clippy::too_many_arguments)]
pub async fn edit(
    config: &Config,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
    priority: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let priority = parse_priority(priority)?;

    let patch = TodoPatch {
        title,
        description,
        completed,
        priority,
        tags,
    };

    if patch.is_empty() {
        return Err(TaskdeckError::Config(
            "nothing to change; pass at least one of --title, --description, --completed, --priority, --tags".into(),
        )
        .into());
    }

    let mut store = make_store(config)?;
    let todo = store.update(id, &patch).await?;

    println!("{}", format!("Updated task {}", todo.id).green());
    print_todo(&todo);
    Ok(())
}

/// Toggle a task's completion flag.
pub async fn toggle(config: &Config, id: i64) -> Result<()> {
    let mut store = make_store(config)?;
    let todo = store.toggle_complete(id).await?;

    let state = if todo.completed { "done" } else { "pending" };
    println!(
        "{}",
        format!("Task {} '{}' is now {}", todo.id, todo.title, state).green()
    );
    Ok(())
}

/// Delete a task, prompting for confirmation unless `--yes` was given.
pub async fn delete(config: &Config, id: i64, yes: bool) -> Result<()> {
    let mut store = make_store(config)?;

    if !yes {
        let todo = store.get(id).await?;
        let answer = prompt_line(&format!("Delete task {} '{}'? [y/N] ", todo.id, todo.title))?;
        if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted");
            return Ok(());
        }
    }

    store.delete(id).await?;
    println!("{}", format!("Deleted task {}", id).green());
    Ok(())
}

fn make_store(config: &Config) -> Result<TodoStore> {
    let store = build_store(config)?;
    let client = build_client(config, store)?;
    Ok(TodoStore::new(client))
}

fn parse_priority(priority: Option<String>) -> Result<Option<Priority>> {
    priority
        .map(|p| p.parse::<Priority>())
        .transpose()
        .map_err(|e| TaskdeckError::Config(e).into())
}

fn print_todo(todo: &Todo) {
    let state = if todo.completed {
        "done".green()
    } else {
        "pending".yellow()
    };

    println!("{} {}", format!("#{}", todo.id).bold(), todo.title.bold());
    println!("  status:   {}", state);
    println!("  priority: {}", todo.priority);
    if let Some(description) = &todo.description {
        println!("  notes:    {}", description);
    }
    if let Some(tags) = &todo.tags {
        println!("  tags:     {}", tags);
    }
    println!("  created:  {}", todo.created_at.format("%Y-%m-%d %H:%M"));
    println!("  updated:  {}", todo.updated_at.format("%Y-%m-%d %H:%M"));
}
