//! Store Module
//!
//! This module provides the shared in-memory file store for textfs.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 StoreEngine                  │
//! │     RwLock<HashMap<name, content>>           │
//! │     + server start instant (uptime)          │
//! └──────────────────────────────────────────────┘
//!                      ▲
//!                      │ Arc, shared by
//!                      │ every connection
//! ```
//!
//! ## Features
//!
//! - **Single shared map**: one store per server, shared by all clients
//! - **Atomic commands**: each operation holds the lock for its whole
//!   check-then-act sequence
//! - **Seeded files**: `readme.txt`, `config.ini`, `data.txt` at startup
//! - **Uptime clock**: immutable start instant, injectable for tests
//!
//! ## Example
//!
//! ```
//! use textfs::store::StoreEngine;
//! use std::sync::Arc;
//!
//! let store = Arc::new(StoreEngine::new());
//!
//! store.write("notes.txt", "hello");
//! assert_eq!(store.read("notes.txt"), Some("hello".to_string()));
//! assert!(store.list().contains(&"notes.txt".to_string()));
//! ```

pub mod engine;

// Re-export commonly used types
pub use engine::StoreEngine;
