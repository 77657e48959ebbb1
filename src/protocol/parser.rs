//! Text Command Parser
//!
//! Turns one raw client message into a [`Command`].
//!
//! ## Design
//!
//! 1. **Trim**: leading and trailing whitespace is stripped.
//! 2. **Split**: the message is split on *literal single spaces* (`' '`),
//!    not on general whitespace. Runs of spaces therefore produce
//!    empty-string tokens inside the argument list, which downstream
//!    handlers preserve when re-joining.
//! 3. **Normalize**: the first token becomes the uppercased command name;
//!    the rest are positional arguments in original case.
//!
//! An empty or whitespace-only message parses to `None`; the caller replies
//! with a generic invalid-command error and performs no state change.
//!
//! Splitting on a single literal space is deliberate. Existing clients rely
//! on it: `ECHO a  b` must round-trip the double space, and content payloads
//! are reconstructed by joining tokens with single spaces.

use crate::protocol::types::Command;

/// Parses a raw message into a [`Command`].
///
/// Returns `None` when the message is empty after trimming.
///
/// # Example
///
/// ```
/// use textfs::protocol::parse_command;
///
/// let cmd = parse_command("  read config.ini  ").unwrap();
/// assert_eq!(cmd.name, "READ");
/// assert_eq!(cmd.args, vec!["config.ini"]);
///
/// assert!(parse_command("   ").is_none());
/// ```
pub fn parse_command(raw: &str) -> Option<Command> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut tokens = trimmed.split(' ');
    // split() always yields at least one token for non-empty input
    let name = tokens.next()?;
    let args = tokens.map(str::to_string).collect();

    Some(Command::new(name, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_command() {
        let cmd = parse_command("LIST").unwrap();
        assert_eq!(cmd.name, "LIST");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_parse_lowercase_name() {
        let cmd = parse_command("read a.txt").unwrap();
        assert_eq!(cmd.name, "READ");
        assert_eq!(cmd.args, vec!["a.txt"]);
    }

    #[test]
    fn test_parse_preserves_arg_case() {
        let cmd = parse_command("write Readme.TXT Hello").unwrap();
        assert_eq!(cmd.name, "WRITE");
        assert_eq!(cmd.args, vec!["Readme.TXT", "Hello"]);
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let cmd = parse_command("  LIST  ").unwrap();
        assert_eq!(cmd.name, "LIST");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_parse_empty_returns_none() {
        assert!(parse_command("").is_none());
        assert!(parse_command("   ").is_none());
        assert!(parse_command("\t\r\n").is_none());
    }

    #[test]
    fn test_parse_double_space_yields_empty_token() {
        let cmd = parse_command("ECHO a  b").unwrap();
        assert_eq!(cmd.args, vec!["a", "", "b"]);
    }

    #[test]
    fn test_parse_multiword_payload() {
        let cmd = parse_command("WRITE a.txt hello world").unwrap();
        assert_eq!(cmd.name, "WRITE");
        assert_eq!(cmd.args, vec!["a.txt", "hello", "world"]);
    }
}
