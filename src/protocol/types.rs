//! Protocol Command Types
//!
//! A parsed client message. Commands are ephemeral values: they exist for
//! the duration of one dispatch and are never stored.
//!
//! ## Wire Format
//!
//! One command per line, tokens separated by single spaces:
//!
//! ```text
//! WRITE notes.txt hello world
//! READ notes.txt
//! LIST
//! ```
//!
//! The command name is case-insensitive on the wire (normalized to uppercase
//! during parsing); arguments keep their original case.

use std::fmt;

/// A parsed command: an uppercased name plus positional argument tokens.
///
/// Argument tokens come from splitting on *literal single spaces*, so runs
/// of spaces in the raw message produce empty-string tokens. Handlers that
/// re-join arguments with single spaces reproduce the original spacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The command name, normalized to uppercase (e.g. `"READ"`).
    pub name: String,
    /// Positional arguments in original case, possibly empty.
    pub args: Vec<String>,
}

impl Command {
    /// Creates a command from a name and argument list.
    ///
    /// The name is uppercased; arguments are taken as-is.
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into().to_uppercase(),
            args,
        }
    }

    /// Returns the filename argument, if one was supplied.
    ///
    /// The first argument must be present *and* non-empty to count as a
    /// filename. A leading run of spaces produces an empty first token,
    /// which is treated the same as no argument at all.
    pub fn filename(&self) -> Option<&str> {
        match self.args.first() {
            Some(name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }

    /// Returns all arguments after the first, re-joined with single spaces.
    ///
    /// This is the content payload for `WRITE` and `APPEND`. May be empty.
    pub fn content(&self) -> String {
        if self.args.len() > 1 {
            self.args[1..].join(" ")
        } else {
            String::new()
        }
    }

    /// Returns all arguments re-joined with single spaces (used by `ECHO`).
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.args.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases_name() {
        let cmd = Command::new("read", vec!["a.txt".to_string()]);
        assert_eq!(cmd.name, "READ");
        assert_eq!(cmd.args, vec!["a.txt"]);
    }

    #[test]
    fn test_filename_present() {
        let cmd = Command::new("READ", vec!["a.txt".to_string()]);
        assert_eq!(cmd.filename(), Some("a.txt"));
    }

    #[test]
    fn test_filename_missing() {
        let cmd = Command::new("READ", vec![]);
        assert_eq!(cmd.filename(), None);
    }

    #[test]
    fn test_filename_empty_token() {
        // "READ  a.txt" splits into ["", "a.txt"]; the empty first token
        // does not count as a filename.
        let cmd = Command::new("READ", vec![String::new(), "a.txt".to_string()]);
        assert_eq!(cmd.filename(), None);
    }

    #[test]
    fn test_content_joins_with_spaces() {
        let cmd = Command::new(
            "WRITE",
            vec!["a.txt".to_string(), "hello".to_string(), "world".to_string()],
        );
        assert_eq!(cmd.content(), "hello world");
    }

    #[test]
    fn test_content_empty_without_payload() {
        let cmd = Command::new("WRITE", vec!["a.txt".to_string()]);
        assert_eq!(cmd.content(), "");
    }

    #[test]
    fn test_joined_args_preserves_empty_tokens() {
        let cmd = Command::new(
            "ECHO",
            vec!["a".to_string(), String::new(), "b".to_string()],
        );
        assert_eq!(cmd.joined_args(), "a  b");
    }

    #[test]
    fn test_display() {
        let cmd = Command::new("write", vec!["a.txt".to_string(), "hi".to_string()]);
        assert_eq!(cmd.to_string(), "WRITE a.txt hi");
    }
}
