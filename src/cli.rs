//! Command-line interface definition for Taskdeck
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication, task management, the assistant
//! chat, and the theme preference.

use clap::{Parser, Subcommand};

/// Taskdeck - command-line client for the Taskdeck task-management service
///
/// Manage your tasks from the terminal: log in, list and edit tasks, and
/// talk to the assistant in natural language.
#[derive(Parser, Debug, Clone)]
#[command(name = "taskdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Base URL of the Taskdeck service (overrides config)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to the profile file (overrides config)
    #[arg(long)]
    pub profile: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Taskdeck
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Register a new account and log in
    Register {
        /// Email address for the new account
        email: String,

        /// Password; prompted interactively when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log in to the service
    Login {
        /// Email address of the account
        email: String,

        /// Password; prompted interactively when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out and clear the stored credential
    Logout,

    /// Show the current identity
    Whoami {
        /// Emit the identity as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all tasks
    List {
        /// Emit the task list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new task
    Add {
        /// Task title
        title: String,

        /// Optional longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Priority: low, medium, or high (default medium)
        #[arg(short, long)]
        priority: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Show a single task
    Show {
        /// Task identifier
        id: i64,

        /// Emit the task as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task identifier
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Set the completion flag directly (true or false)
        #[arg(long)]
        completed: Option<bool>,

        /// New priority: low, medium, or high
        #[arg(long)]
        priority: Option<String>,

        /// New comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Toggle a task's completion flag
    Toggle {
        /// Task identifier
        id: i64,
    },

    /// Delete a task
    Delete {
        /// Task identifier
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Talk to the task assistant in natural language
    Chat {
        /// One-shot message; starts an interactive session when omitted
        message: Option<String>,

        /// Continue an existing conversation
        #[arg(long)]
        conversation: Option<i64>,
    },

    /// Show or set the theme preference (light or dark)
    Theme {
        /// New theme; shows the current preference when omitted
        mode: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
