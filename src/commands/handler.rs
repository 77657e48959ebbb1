//! Command Handler Module
//!
//! This module implements every textfs command. It receives parsed
//! [`Command`] values, executes them against the store, and returns the
//! reply lines to send back to the client.
//!
//! ## Supported Commands
//!
//! ### File Commands
//! - `CREATE name` - Create an empty file (fails if it exists)
//! - `READ name` - Return a file's content
//! - `WRITE name content...` - Overwrite a file (upsert)
//! - `APPEND name content...` - Append to a file (upsert)
//! - `DELETE name` - Remove a file (fails if absent)
//! - `LIST` - Enumerate all files
//!
//! ### Server Commands
//! - `TIME` - Current date and time
//! - `ECHO args...` - Echo the arguments back
//! - `STATS` - File count and uptime
//! - `UPTIME` - Uptime in whole seconds
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │ execute_raw │───>│  dispatch() │───>│  cmd_*()    │      │
//! │  └─────────────┘    └─────────────┘    └─────────────┘      │
//! │                                               │             │
//! │                                               ▼             │
//! │                                          StoreEngine        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every handler is a total function over (store, args): commands that only
//! read never mutate, error replies never change state, and each reply line
//! format is fixed for interoperability with existing clients.

use crate::protocol::{parse_command, Command};
use crate::store::StoreEngine;
use std::sync::Arc;
use tracing::trace;

/// Reply sent for an empty or unparseable message.
pub const INVALID_COMMAND: &str = "ERROR: invalid command";

/// Executes textfs commands against the shared store.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    /// The shared store
    store: Arc<StoreEngine>,
}

impl CommandHandler {
    /// Creates a new command handler over the given store.
    pub fn new(store: Arc<StoreEngine>) -> Self {
        Self { store }
    }

    /// Parses and executes one raw client message.
    ///
    /// This is the full parse-dispatch-reply pipeline: empty messages get
    /// the generic invalid-command error, everything else is dispatched.
    pub fn execute_raw(&self, raw: &str) -> Vec<String> {
        match parse_command(raw) {
            Some(command) => self.execute(command),
            None => vec![INVALID_COMMAND.to_string()],
        }
    }

    /// Executes a parsed command and returns the reply lines.
    pub fn execute(&self, command: Command) -> Vec<String> {
        trace!(command = %command, "Executing command");
        self.dispatch(&command.name, &command)
    }

    /// Dispatches a command to its handler by uppercased name.
    fn dispatch(&self, name: &str, command: &Command) -> Vec<String> {
        match name {
            // Server commands
            "TIME" => self.cmd_time(),
            "ECHO" => self.cmd_echo(command),
            "STATS" => self.cmd_stats(),
            "UPTIME" => self.cmd_uptime(),

            // File commands
            "LIST" => self.cmd_list(),
            "READ" => self.cmd_read(command),
            "CREATE" => self.cmd_create(command),
            "WRITE" => self.cmd_write(command),
            "APPEND" => self.cmd_append(command),
            "DELETE" => self.cmd_delete(command),

            // Unknown command
            _ => vec![format!("ERROR: Unknown command '{}'", name)],
        }
    }

    // ========================================================================
    // Server Commands
    // ========================================================================

    /// TIME
    fn cmd_time(&self) -> Vec<String> {
        let now = chrono::Local::now();
        vec![now.format("%Y-%m-%d %H:%M:%S").to_string()]
    }

    /// ECHO args...
    fn cmd_echo(&self, command: &Command) -> Vec<String> {
        // Re-joining with single spaces preserves empty tokens from runs
        // of spaces in the original message.
        vec![command.joined_args()]
    }

    /// STATS
    ///
    /// The command count is not tracked and is reported as the literal
    /// `N/A`, matching the deployed protocol.
    fn cmd_stats(&self) -> Vec<String> {
        vec![
            "Commands handled: N/A".to_string(),
            format!("Files: {}", self.store.file_count()),
            format!("Server uptime (s): {}", self.store.uptime_secs()),
        ]
    }

    /// UPTIME
    fn cmd_uptime(&self) -> Vec<String> {
        vec![format!("Server uptime (s): {}", self.store.uptime_secs())]
    }

    // ========================================================================
    // File Commands
    // ========================================================================

    /// LIST
    fn cmd_list(&self) -> Vec<String> {
        let mut lines = vec!["📁 Directory listing:".to_string()];
        for name in self.store.list() {
            lines.push(format!("  📄 {}", name));
        }
        lines
    }

    /// READ name
    fn cmd_read(&self, command: &Command) -> Vec<String> {
        let Some(name) = command.filename() else {
            return vec!["ERROR: READ needs filename".to_string()];
        };

        match self.store.read(name) {
            Some(content) => vec![format!("📖 {}:", name), content],
            None => vec![format!("ERROR: File '{}' not found", name)],
        }
    }

    /// CREATE name
    fn cmd_create(&self, command: &Command) -> Vec<String> {
        let Some(name) = command.filename() else {
            return vec!["ERROR: CREATE needs filename".to_string()];
        };

        if self.store.create(name) {
            vec![format!("OK: Created {}", name)]
        } else {
            vec![format!("ERROR: File '{}' already exists", name)]
        }
    }

    /// WRITE name content...
    fn cmd_write(&self, command: &Command) -> Vec<String> {
        let Some(name) = command.filename() else {
            return vec!["ERROR: WRITE needs filename and content".to_string()];
        };

        // Content may be empty; only a missing filename is an error.
        self.store.write(name, &command.content());
        vec![format!("OK: Written to {}", name)]
    }

    /// APPEND name content...
    fn cmd_append(&self, command: &Command) -> Vec<String> {
        let Some(name) = command.filename() else {
            return vec!["ERROR: APPEND needs filename and content".to_string()];
        };

        self.store.append(name, &command.content());
        vec![format!("OK: Appended to {}", name)]
    }

    /// DELETE name
    fn cmd_delete(&self, command: &Command) -> Vec<String> {
        let Some(name) = command.filename() else {
            return vec!["ERROR: DELETE needs filename".to_string()];
        };

        if self.store.delete(name) {
            vec![format!("OK: Deleted {}", name)]
        } else {
            vec![format!("ERROR: '{}' not found", name)]
        }
    }
}
