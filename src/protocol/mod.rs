//! Text Protocol Implementation
//!
//! This module implements the line-based text protocol spoken by textfs clients.
//!
//! ## Overview
//!
//! Unlike binary protocols, textfs commands are plain whitespace-delimited
//! text, one command per line. This makes the server usable from `telnet`
//! or `nc` without any special client.
//!
//! ## Modules
//!
//! - `types`: Defines the `Command` value produced by parsing
//! - `parser`: Turns a raw message into a `Command`
//!
//! ## Example
//!
//! ```
//! use textfs::protocol::parse_command;
//!
//! let cmd = parse_command("write notes.txt hello world").unwrap();
//! assert_eq!(cmd.name, "WRITE");
//! assert_eq!(cmd.args, vec!["notes.txt", "hello", "world"]);
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::parse_command;
pub use types::Command;
