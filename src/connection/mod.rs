//! Connection Handler Module
//!
//! This module manages individual client connections to textfs.
//! Each client connection is handled by its own async task, so one slow
//! client never blocks the others.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                            │
//! │                      (main.rs)                              │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │
//!                        │ accept()
//!                        ▼
//!           ┌────────────────────────┐
//!           │   For each client...   │
//!           └────────────┬───────────┘
//!                        │
//!                        │ spawn task
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ConnectionHandler                           │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │ Read lines  │───>│ Parse text  │───>│ Execute cmd │      │
//! │  └─────────────┘    └─────────────┘    └─────────────┘      │
//! │                                               │             │
//! │                                               ▼             │
//! │                                      ┌─────────────┐        │
//! │                                      │ Send lines  │        │
//! │                                      └─────────────┘        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Async I/O**: Uses Tokio for non-blocking network operations
//! - **Line framing**: BytesMut buffer split on newlines, `\r` tolerated
//! - **Welcome line**: sent on connect before any command is processed
//! - **Pipelining**: multiple command lines in a single TCP packet work
//! - **Statistics**: tracks connection and command metrics
//!
//! ## Example
//!
//! ```ignore
//! use textfs::connection::{handle_connection, ConnectionStats};
//! use textfs::commands::CommandHandler;
//! use textfs::store::StoreEngine;
//! use std::sync::Arc;
//!
//! let store = Arc::new(StoreEngine::new());
//! let stats = Arc::new(ConnectionStats::new());
//!
//! // For each accepted connection...
//! let (stream, addr) = listener.accept().await?;
//! let handler = CommandHandler::new(Arc::clone(&store));
//! tokio::spawn(handle_connection(stream, addr, handler, Arc::clone(&stats)));
//! ```

pub mod handler;

// Re-export commonly used types
pub use handler::{
    handle_connection, ConnectionError, ConnectionHandler, ConnectionStats, WELCOME_LINE,
};
