//! # textfs - An In-Memory File Store Over a TCP Text Protocol
//!
//! textfs is a small multi-client TCP server written in Rust. It exposes an
//! in-memory name → content store through a line-based, human-typeable text
//! protocol: connect with `telnet` or `nc`, type `LIST`, and go.
//!
//! ## Features
//!
//! - **Plain-Text Protocol**: whitespace-delimited commands, one per line
//! - **Shared Store**: one store per server, visible to every client
//! - **Atomic Commands**: each command's read-modify-write is a single
//!   critical section, so concurrent clients never see partial state
//! - **Async I/O**: built on Tokio, one task per connection
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           textfs                             │
//! │                                                              │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐       │
//! │  │ TCP Server  │───>│ Connection  │───>│  Command    │       │
//! │  │ (Listener)  │    │  Handler    │    │  Handler    │       │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘       │
//! │                                               │              │
//! │                                               ▼              │
//! │  ┌─────────────┐    ┌───────────────────────────────────┐    │
//! │  │   Text      │    │            StoreEngine            │    │
//! │  │   Parser    │    │   RwLock<HashMap<name, content>>  │    │
//! │  │             │    │   + server start instant          │    │
//! │  └─────────────┘    └───────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use textfs::commands::CommandHandler;
//! use textfs::connection::{handle_connection, ConnectionStats};
//! use textfs::store::StoreEngine;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(StoreEngine::new());
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind("127.0.0.1:5566").await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         let handler = CommandHandler::new(Arc::clone(&store));
//!         let stats = Arc::clone(&stats);
//!
//!         tokio::spawn(handle_connection(stream, addr, handler, stats));
//!     }
//! }
//! ```
//!
//! ## Supported Commands
//!
//! ### File Commands
//! - `CREATE name` - create an empty file
//! - `READ name` - print a file's content
//! - `WRITE name content...` - overwrite a file
//! - `APPEND name content...` - append to a file
//! - `DELETE name` - remove a file
//! - `LIST` - list all files
//!
//! ### Server Commands
//! - `TIME` - current date and time
//! - `ECHO args...` - echo arguments back
//! - `STATS` - file count and uptime
//! - `UPTIME` - uptime in seconds
//!
//! ## Module Overview
//!
//! - [`protocol`]: text command parser and types
//! - [`store`]: thread-safe shared file store
//! - [`commands`]: handlers for all supported commands
//! - [`connection`]: client connection management
//!
//! ## Concurrency Contract
//!
//! All connections share one [`store::StoreEngine`] behind an `Arc`. Every
//! store operation takes the store lock exactly once for its whole
//! check-then-act sequence, so commands are atomic with respect to each
//! other: two concurrent `CREATE` calls for the same absent name produce
//! exactly one success.

pub mod commands;
pub mod connection;
pub mod protocol;
pub mod store;

// Re-export commonly used types for convenience
pub use commands::CommandHandler;
pub use connection::{handle_connection, ConnectionStats, WELCOME_LINE};
pub use protocol::{parse_command, Command};
pub use store::StoreEngine;

/// The default port textfs listens on
pub const DEFAULT_PORT: u16 = 5566;

/// The default host textfs binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of textfs
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
