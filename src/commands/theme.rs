//! Theme preference command.
//!
//! The preference lives in the profile store under the fixed `theme` key;
//! unset means light.

use crate::commands::build_store;
use crate::config::Config;
use crate::error::{Result, TaskdeckError};
use crate::storage::keys;

use colored::Colorize;

/// Show or set the theme preference.
pub fn run_theme(config: &Config, mode: Option<String>) -> Result<()> {
    let store = build_store(config)?;

    match mode {
        None => {
            match store.get(keys::THEME)? {
                Some(theme) => println!("Theme: {}", theme.bold()),
                None => println!("Theme: {} (no preference set)", "light".bold()),
            }
            Ok(())
        }
        Some(mode) => {
            let mode = mode.to_lowercase();
            if mode != "light" && mode != "dark" {
                return Err(TaskdeckError::Config(format!(
                    "invalid theme '{}', expected light or dark",
                    mode
                ))
                .into());
            }
            store.set(keys::THEME, &mode)?;
            println!("{}", format!("Theme set to {}", mode).green());
            Ok(())
        }
    }
}
