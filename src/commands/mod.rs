//! Command Handler Module
//!
//! This module implements the command processing layer for textfs.
//! It receives raw client messages, parses them, executes them against the
//! store, and returns the reply lines.
//!
//! ## Architecture
//!
//! ```text
//! Client Message
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  parse_command  │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Dispatch     │
//! │  - Validate     │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   StoreEngine   │  (store module)
//! └─────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! ### File Commands
//! - `CREATE`, `READ`, `WRITE`, `APPEND`, `DELETE`, `LIST`
//!
//! ### Server Commands
//! - `TIME`, `ECHO`, `STATS`, `UPTIME`

pub mod handler;

// Re-export the main command handler
pub use handler::{CommandHandler, INVALID_COMMAND};
