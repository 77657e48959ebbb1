//! Thread-Safe In-Memory File Store
//!
//! This module implements the core store for textfs: a shared mapping from
//! file name to text content, plus the server-start timestamp used for
//! uptime reporting.
//!
//! ## Design Decisions
//!
//! 1. **Single RwLock**: The store is small and every command touches it at
//!    most once, so one lock over the whole map keeps each command's
//!    read-modify-write trivially atomic. Readers (`READ`, `LIST`) share the
//!    lock; mutators take it exclusively.
//! 2. **Seeded state**: The store starts with a fixed set of files so a
//!    fresh server is immediately explorable from `LIST`/`READ`.
//! 3. **Injectable clock**: The start instant is a constructor argument in
//!    disguise ([`StoreEngine::with_start_time`]) so tests can pin uptime.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 StoreEngine                  │
//! │  ┌────────────────────────────────────────┐  │
//! │  │   RwLock<HashMap<String, String>>      │  │
//! │  │   (one atomic operation per command)   │  │
//! │  └────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//!        ▲            ▲            ▲
//!        │            │            │
//!    conn task    conn task    conn task
//! ```
//!
//! Every engine method acquires the lock exactly once for its full
//! check-then-act sequence, so two concurrent `create` calls for the same
//! absent name can never both succeed.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

/// Files present in a freshly started server.
const SEED_FILES: &[(&str, &str)] = &[
    ("readme.txt", "Welcome to TCP Server!\nThis is a test file."),
    ("config.ini", "[Settings]\nport=5566\nip=127.0.0.1"),
    ("data.txt", "Sample data file content"),
];

/// The shared name → content store.
///
/// There is exactly one `StoreEngine` per running server, wrapped in an
/// `Arc` and shared by every connection task. All operations are
/// thread-safe and atomic with respect to each other.
///
/// # Example
///
/// ```
/// use textfs::store::StoreEngine;
///
/// let store = StoreEngine::new();
///
/// assert!(store.create("notes.txt"));
/// store.write("notes.txt", "hello");
/// assert_eq!(store.read("notes.txt"), Some("hello".to_string()));
/// assert!(store.delete("notes.txt"));
/// ```
pub struct StoreEngine {
    /// The file map. One lock guards the whole map; see module docs.
    files: RwLock<HashMap<String, String>>,

    /// Captured once at construction, read-only thereafter.
    started_at: Instant,
}

impl std::fmt::Debug for StoreEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreEngine")
            .field("files", &self.file_count())
            .field("uptime_secs", &self.uptime_secs())
            .finish()
    }
}

impl Default for StoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreEngine {
    /// Creates a new store seeded with the default files, with the uptime
    /// clock starting now.
    pub fn new() -> Self {
        Self::with_start_time(Instant::now())
    }

    /// Creates a new store with an explicit start instant.
    ///
    /// Tests use this to pin the uptime clock.
    pub fn with_start_time(started_at: Instant) -> Self {
        let files = SEED_FILES
            .iter()
            .map(|(name, content)| (name.to_string(), content.to_string()))
            .collect();

        Self {
            files: RwLock::new(files),
            started_at,
        }
    }

    /// Creates an empty file.
    ///
    /// # Returns
    ///
    /// `true` if the file was created, `false` if the name already exists
    /// (in which case nothing changes).
    pub fn create(&self, name: &str) -> bool {
        let mut files = self.files.write().unwrap();

        if files.contains_key(name) {
            return false;
        }
        files.insert(name.to_string(), String::new());
        true
    }

    /// Returns the content of a file, or `None` if it does not exist.
    pub fn read(&self, name: &str) -> Option<String> {
        let files = self.files.read().unwrap();
        files.get(name).cloned()
    }

    /// Writes content to a file, creating it if absent and overwriting it
    /// unconditionally if present.
    pub fn write(&self, name: &str, content: &str) {
        let mut files = self.files.write().unwrap();
        files.insert(name.to_string(), content.to_string());
    }

    /// Appends content to a file, with no separator inserted.
    ///
    /// A missing file is treated as existing with empty content, so append
    /// on an absent name behaves like a write.
    pub fn append(&self, name: &str, content: &str) {
        let mut files = self.files.write().unwrap();
        files
            .entry(name.to_string())
            .or_default()
            .push_str(content);
    }

    /// Deletes a file.
    ///
    /// # Returns
    ///
    /// `true` if the file was deleted, `false` if it did not exist.
    pub fn delete(&self, name: &str) -> bool {
        let mut files = self.files.write().unwrap();
        files.remove(name).is_some()
    }

    /// Returns all current file names, sorted for deterministic output.
    pub fn list(&self) -> Vec<String> {
        let files = self.files.read().unwrap();
        let mut names: Vec<String> = files.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns `true` if the file exists.
    pub fn exists(&self, name: &str) -> bool {
        let files = self.files.read().unwrap();
        files.contains_key(name)
    }

    /// Returns the number of files currently stored.
    pub fn file_count(&self) -> usize {
        let files = self.files.read().unwrap();
        files.len()
    }

    /// Returns whole seconds elapsed since the server started.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_seed_files_present() {
        let store = StoreEngine::new();

        assert_eq!(store.file_count(), 3);
        assert!(store.exists("readme.txt"));
        assert!(store.exists("config.ini"));
        assert!(store.exists("data.txt"));
        assert_eq!(
            store.read("data.txt"),
            Some("Sample data file content".to_string())
        );
    }

    #[test]
    fn test_create_then_read_empty() {
        let store = StoreEngine::new();

        assert!(store.create("new.txt"));
        assert_eq!(store.read("new.txt"), Some(String::new()));
    }

    #[test]
    fn test_create_existing_fails_and_preserves_content() {
        let store = StoreEngine::new();

        let before = store.read("readme.txt");
        assert!(!store.create("readme.txt"));
        assert_eq!(store.read("readme.txt"), before);
    }

    #[test]
    fn test_write_overwrites() {
        let store = StoreEngine::new();

        store.write("a.txt", "first");
        store.write("a.txt", "second");
        assert_eq!(store.read("a.txt"), Some("second".to_string()));
    }

    #[test]
    fn test_append_concatenates_without_separator() {
        let store = StoreEngine::new();

        store.write("a.txt", "hello world");
        store.append("a.txt", "!!");
        assert_eq!(store.read("a.txt"), Some("hello world!!".to_string()));
    }

    #[test]
    fn test_append_creates_missing_file() {
        let store = StoreEngine::new();

        store.append("fresh.txt", "data");
        assert_eq!(store.read("fresh.txt"), Some("data".to_string()));
    }

    #[test]
    fn test_delete() {
        let store = StoreEngine::new();

        store.write("a.txt", "x");
        assert!(store.delete("a.txt"));
        assert!(!store.delete("a.txt"));
        assert_eq!(store.read("a.txt"), None);
    }

    #[test]
    fn test_list_tracks_current_key_set() {
        let store = StoreEngine::new();

        store.create("zzz.txt");
        store.delete("readme.txt");

        let names = store.list();
        assert_eq!(names, vec!["config.ini", "data.txt", "zzz.txt"]);
    }

    #[test]
    fn test_uptime_is_monotonic() {
        let store = StoreEngine::new();

        let a = store.uptime_secs();
        let b = store.uptime_secs();
        assert!(b >= a);
    }

    #[test]
    fn test_uptime_with_pinned_start() {
        let start = Instant::now() - Duration::from_secs(42);
        let store = StoreEngine::with_start_time(start);

        assert!(store.uptime_secs() >= 42);
    }

    #[test]
    fn test_concurrent_create_single_winner() {
        let store = Arc::new(StoreEngine::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || store.create("race.txt")));
        }

        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();

        assert_eq!(wins, 1);
        assert!(store.exists("race.txt"));
    }
}
