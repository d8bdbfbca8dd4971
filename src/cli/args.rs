//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::config::AppConfig;

/// ClipStack - clipboard history agent with popup paste
#[derive(Parser, Debug)]
#[command(name = "clipstack")]
#[command(version = "1.0.0")]
#[command(about = "Clipboard history agent with popup paste and global hotkey")]
#[command(long_about = None)]
pub struct Cli {
    /// History depth (1-100)
    #[arg(long, value_name = "N", env = "CLIPSTACK_HISTORY_DEPTH")]
    pub history_depth: Option<u32>,

    /// Clipboard poll interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Keep history order on paste (default moves pasted items to top)
    #[arg(long)]
    pub no_move_to_top: bool,

    /// Always paste rich text as plain text
    #[arg(long)]
    pub plain_text: bool,

    /// App identifier whose clipboard is never captured (repeatable)
    #[arg(long = "exclude", value_name = "APP")]
    pub excluded: Vec<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send commands to the running agent
    Ctl {
        #[command(subcommand)]
        action: CtlAction,
    },
}

/// Agent control actions (sent over the control socket)
#[derive(Subcommand, Debug, Clone)]
pub enum CtlAction {
    /// Toggle popup visibility
    Toggle,
    /// Show the popup; optionally hand off the true previous app
    Show {
        /// App identifier to restore focus to after the popup closes
        app: Option<String>,
    },
    /// Hide the popup without selecting
    Hide,
    /// Select an item of the filtered view (writes it and pastes)
    Select {
        /// Index into the filtered view, 0 = most recent
        index: usize,
    },
    /// Set the popup search query (empty clears it)
    Search {
        query: Option<String>,
    },
    /// Set the popup content filter
    Filter {
        /// One of: all, text, images, urls, files
        filter: String,
    },
    /// List the filtered view as JSON
    List,
    /// Show agent status
    Status,
    /// Remove a history item by raw history index
    Remove {
        index: usize,
    },
    /// Clear the whole history
    Clear,
    /// Begin hotkey rebind capture (suspends the live hotkey)
    RebindBegin,
    /// Feed a key event to an open rebind capture
    RebindKey {
        /// Virtual key code
        key_code: u32,
        /// Modifier mask (1=cmd, 2=alt, 4=ctrl, 8=shift; values add)
        modifiers: u32,
    },
    /// Abandon rebind capture, restoring the previous hotkey
    RebindCancel,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "history_depth",
    "move_selected_pastes_to_top",
    "always_paste_plain_text",
    "excluded_apps",
    "hotkey_key_code",
    "hotkey_modifiers",
    "poll_interval_ms",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

impl Cli {
    /// Overrides supplied on the command line, as a partial config
    pub fn as_config(&self) -> AppConfig {
        AppConfig {
            history_depth: self.history_depth,
            poll_interval_ms: self.poll_interval_ms,
            move_selected_pastes_to_top: if self.no_move_to_top { Some(false) } else { None },
            always_paste_plain_text: if self.plain_text { Some(true) } else { None },
            excluded_apps: if self.excluded.is_empty() {
                None
            } else {
                Some(self.excluded.clone())
            },
            ..Default::default()
        }
    }
}
