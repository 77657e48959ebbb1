//! Connection Handler Module
//!
//! This module handles individual client connections to textfs.
//! Each client gets its own handler task that runs in a loop,
//! reading command lines and sending reply lines.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. Server sends the welcome line
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Read bytes from socket  │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Extract one line        │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Parse + execute command │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Send reply lines        │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │         [Loop back]          │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 4. Client disconnects / error
//! ```
//!
//! ## Buffer Management
//!
//! We use a BytesMut buffer to accumulate incoming data. This is important
//! because TCP is a stream protocol - we might receive partial lines, or
//! multiple lines in a single read. A trailing `\r` before the newline is
//! stripped so telnet clients work out of the box.

use crate::commands::CommandHandler;
use bytes::BytesMut;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tracing::{debug, error, info, trace, warn};

/// Greeting sent to every client immediately after the connection opens,
/// before any command is processed.
pub const WELCOME_LINE: &str = "WELCOME: Connected to TCP Server Pro";

/// Maximum size for the read buffer (64 KB)
const MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Statistics for connection handling
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Handles a single client connection.
///
/// This struct manages the read buffer, line framing, and reply sending
/// for one connected client.
pub struct ConnectionHandler {
    /// The TCP stream for this connection
    stream: BufWriter<TcpStream>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// Buffer for incoming data
    buffer: BytesMut,

    /// The command handler (shares the store with every other connection)
    command_handler: CommandHandler,

    /// Connection statistics (shared)
    stats: Arc<ConnectionStats>,
}

impl ConnectionHandler {
    /// Creates a new connection handler.
    ///
    /// # Arguments
    ///
    /// * `stream` - The TCP stream for this connection
    /// * `addr` - The client's socket address
    /// * `command_handler` - The command handler for executing commands
    /// * `stats` - Shared connection statistics
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        command_handler: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream: BufWriter::new(stream),
            addr,
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            command_handler,
            stats,
        }
    }

    /// Runs the main connection loop.
    ///
    /// Sends the welcome line, then reads commands from the client,
    /// executes them, and sends back replies until the client disconnects
    /// or an error occurs.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => info!(client = %self.addr, "Client disconnected gracefully"),
            Err(e) => match e {
                ConnectionError::ClientDisconnected => {
                    info!(client = %self.addr, "Client disconnected")
                }
                ConnectionError::IoError(io_err)
                    if io_err.kind() == std::io::ErrorKind::ConnectionReset =>
                {
                    debug!(client = %self.addr, "Connection reset by client")
                }
                _ => warn!(client = %self.addr, error = %e, "Connection error"),
            },
        }

        self.stats.connection_closed();
        result
    }

    /// The main read-execute-respond loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        // Greet before processing any command
        self.send_lines(&[WELCOME_LINE.to_string()]).await?;

        loop {
            // Drain every complete line already in the buffer
            while let Some(line) = self.next_line() {
                trace!(client = %self.addr, message = %line, "Received command");

                let reply = self.command_handler.execute_raw(&line);
                self.stats.command_processed();

                self.send_lines(&reply).await?;
            }

            // Need more data - read from the socket
            self.read_more_data().await?;
        }
    }

    /// Extracts the next complete line from the buffer, if one is present.
    ///
    /// The newline terminator and any trailing `\r` are stripped. Bytes are
    /// decoded lossily; the protocol is text and invalid UTF-8 only ever
    /// ends up echoed back inside an error reply.
    fn next_line(&mut self) -> Option<String> {
        let pos = self.buffer.iter().position(|&b| b == b'\n')?;

        let line = self.buffer.split_to(pos + 1);
        let mut end = line.len() - 1;
        if end > 0 && line[end - 1] == b'\r' {
            end -= 1;
        }

        Some(String::from_utf8_lossy(&line[..end]).into_owned())
    }

    /// Reads more data from the socket into the buffer.
    async fn read_more_data(&mut self) -> Result<(), ConnectionError> {
        // A line that never terminates must not grow the buffer forever
        if self.buffer.len() >= MAX_BUFFER_SIZE {
            error!(
                client = %self.addr,
                size = self.buffer.len(),
                "Buffer size limit exceeded"
            );
            return Err(ConnectionError::BufferFull);
        }

        // Ensure we have some capacity
        if self.buffer.capacity() - self.buffer.len() < 1024 {
            self.buffer.reserve(4096);
        }

        // Read data
        let n = self.stream.get_mut().read_buf(&mut self.buffer).await?;

        if n == 0 {
            // Connection closed by client
            if self.buffer.is_empty() {
                return Err(ConnectionError::ClientDisconnected);
            } else {
                // Partial line in buffer
                return Err(ConnectionError::UnexpectedEof);
            }
        }

        self.stats.bytes_read(n);
        trace!(client = %self.addr, bytes = n, "Read data");

        Ok(())
    }

    /// Sends reply lines to the client, each terminated with a newline.
    async fn send_lines(&mut self, lines: &[String]) -> Result<(), ConnectionError> {
        let mut sent = 0;
        for line in lines {
            self.stream.write_all(line.as_bytes()).await?;
            self.stream.write_all(b"\n").await?;
            sent += line.len() + 1;
        }
        self.stream.flush().await?;
        self.stats.bytes_written(sent);
        trace!(client = %self.addr, bytes = sent, "Sent reply");
        Ok(())
    }
}

/// Errors that can occur while handling a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Client disconnected normally
    #[error("Client disconnected")]
    ClientDisconnected,

    /// Unexpected end of stream (partial line)
    #[error("Unexpected end of stream")]
    UnexpectedEof,

    /// Buffer size limit exceeded
    #[error("Buffer size limit exceeded")]
    BufferFull,
}

/// Handles a client connection.
///
/// This is a convenience function that creates a ConnectionHandler
/// and runs it to completion.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<ConnectionStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, command_handler, stats);
    if let Err(e) = handler.run().await {
        match e {
            ConnectionError::ClientDisconnected => {}
            ConnectionError::IoError(ref io_err)
                if io_err.kind() == std::io::ErrorKind::ConnectionReset => {}
            _ => {
                debug!(client = %addr, error = %e, "Connection ended with error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreEngine;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpListener,
    };

    async fn create_test_server() -> (SocketAddr, Arc<StoreEngine>, Arc<ConnectionStats>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let store = Arc::new(StoreEngine::new());
        let stats = Arc::new(ConnectionStats::new());

        let store_clone = Arc::clone(&store);
        let stats_clone = Arc::clone(&stats);

        tokio::spawn(async move {
            while let Ok((stream, client_addr)) = listener.accept().await {
                let handler = CommandHandler::new(Arc::clone(&store_clone));
                let stats = Arc::clone(&stats_clone);
                tokio::spawn(handle_connection(stream, client_addr, handler, stats));
            }
        });

        (addr, store, stats)
    }

    /// Connects and consumes the welcome line, returning a line-buffered
    /// reader plus the write half.
    async fn connect(addr: SocketAddr) -> (BufReader<OwnedReadHalf>, OwnedWriteHalf) {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);

        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        assert_eq!(line, format!("{}\n", WELCOME_LINE));

        (reader, write_half)
    }

    async fn read_line(reader: &mut BufReader<OwnedReadHalf>) -> String {
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        line.trim_end_matches('\n').to_string()
    }

    #[tokio::test]
    async fn test_welcome_sent_before_any_command() {
        let (addr, _, _) = create_test_server().await;

        // connect() asserts the welcome line
        let _client = connect(addr).await;
    }

    #[tokio::test]
    async fn test_echo_round_trip() {
        let (addr, _, _) = create_test_server().await;
        let (mut reader, mut writer) = connect(addr).await;

        writer.write_all(b"ECHO hello world\n").await.unwrap();
        assert_eq!(read_line(&mut reader).await, "hello world");
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let (addr, _, _) = create_test_server().await;
        let (mut reader, mut writer) = connect(addr).await;

        writer.write_all(b"WRITE a.txt hi there\n").await.unwrap();
        assert_eq!(read_line(&mut reader).await, "OK: Written to a.txt");

        writer.write_all(b"READ a.txt\n").await.unwrap();
        assert_eq!(read_line(&mut reader).await, "📖 a.txt:");
        assert_eq!(read_line(&mut reader).await, "hi there");
    }

    #[tokio::test]
    async fn test_crlf_line_endings_accepted() {
        let (addr, _, _) = create_test_server().await;
        let (mut reader, mut writer) = connect(addr).await;

        writer.write_all(b"ECHO telnet\r\n").await.unwrap();
        assert_eq!(read_line(&mut reader).await, "telnet");
    }

    #[tokio::test]
    async fn test_oversized_unterminated_line_closes_connection() {
        let (addr, _, _) = create_test_server().await;
        let (mut reader, mut writer) = connect(addr).await;

        // A line that never terminates must not grow the buffer past the
        // cap; 80 KB without a newline trips it. The write may fail partway
        // if the server drops the connection mid-stream.
        let blob = vec![b'x'; 80 * 1024];
        let _ = writer.write_all(&blob).await;
        let _ = writer.flush().await;

        // The server closes the connection: EOF (or reset) on read
        let mut line = String::new();
        let n = reader.read_line(&mut line).await.unwrap_or(0);
        assert_eq!(n, 0);

        // Other connections are unaffected
        let (mut reader2, mut writer2) = connect(addr).await;
        writer2.write_all(b"ECHO still alive\n").await.unwrap();
        assert_eq!(read_line(&mut reader2).await, "still alive");
    }

    #[tokio::test]
    async fn test_invalid_utf8_decoded_lossily() {
        let (addr, _, _) = create_test_server().await;
        let (mut reader, mut writer) = connect(addr).await;

        // Binary garbage in the payload is decoded lossily, echoed back as
        // replacement characters, and does not kill the connection
        writer.write_all(b"ECHO \xff\xfe\n").await.unwrap();
        assert_eq!(read_line(&mut reader).await, "\u{fffd}\u{fffd}");

        writer.write_all(b"ECHO clean again\n").await.unwrap();
        assert_eq!(read_line(&mut reader).await, "clean again");
    }

    #[tokio::test]
    async fn test_empty_line_is_invalid_command() {
        let (addr, _, _) = create_test_server().await;
        let (mut reader, mut writer) = connect(addr).await;

        writer.write_all(b"\n").await.unwrap();
        assert_eq!(read_line(&mut reader).await, "ERROR: invalid command");
    }

    #[tokio::test]
    async fn test_error_is_non_fatal() {
        let (addr, _, _) = create_test_server().await;
        let (mut reader, mut writer) = connect(addr).await;

        writer.write_all(b"DELETE ghost.txt\n").await.unwrap();
        assert_eq!(read_line(&mut reader).await, "ERROR: 'ghost.txt' not found");

        // The connection stays open and processes further commands
        writer.write_all(b"UPTIME\n").await.unwrap();
        assert!(read_line(&mut reader)
            .await
            .starts_with("Server uptime (s): "));
    }

    #[tokio::test]
    async fn test_store_shared_across_connections() {
        let (addr, _, _) = create_test_server().await;

        let (mut reader_a, mut writer_a) = connect(addr).await;
        writer_a
            .write_all(b"WRITE shared.txt from client a\n")
            .await
            .unwrap();
        assert_eq!(read_line(&mut reader_a).await, "OK: Written to shared.txt");

        let (mut reader_b, mut writer_b) = connect(addr).await;
        writer_b.write_all(b"READ shared.txt\n").await.unwrap();
        assert_eq!(read_line(&mut reader_b).await, "📖 shared.txt:");
        assert_eq!(read_line(&mut reader_b).await, "from client a");
    }

    #[tokio::test]
    async fn test_store_outlives_connection() {
        let (addr, store, _) = create_test_server().await;

        {
            let (mut reader, mut writer) = connect(addr).await;
            writer.write_all(b"WRITE keep.txt persisted\n").await.unwrap();
            assert_eq!(read_line(&mut reader).await, "OK: Written to keep.txt");
        }

        // Give the server time to observe the disconnect
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(store.read("keep.txt"), Some("persisted".to_string()));
    }

    #[tokio::test]
    async fn test_pipelined_commands() {
        let (addr, _, _) = create_test_server().await;
        let (mut reader, mut writer) = connect(addr).await;

        // Multiple commands in one TCP write
        writer
            .write_all(b"CREATE p1.txt\nCREATE p2.txt\nLIST\n")
            .await
            .unwrap();

        assert_eq!(read_line(&mut reader).await, "OK: Created p1.txt");
        assert_eq!(read_line(&mut reader).await, "OK: Created p2.txt");
        assert_eq!(read_line(&mut reader).await, "📁 Directory listing:");
    }

    #[tokio::test]
    async fn test_connection_stats() {
        let (addr, _, stats) = create_test_server().await;

        assert_eq!(stats.active_connections.load(Ordering::Relaxed), 0);

        let (mut reader, mut writer) = connect(addr).await;

        assert_eq!(stats.connections_accepted.load(Ordering::Relaxed), 1);
        assert_eq!(stats.active_connections.load(Ordering::Relaxed), 1);

        writer.write_all(b"LIST\n").await.unwrap();
        let _ = read_line(&mut reader).await;

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(stats.commands_processed.load(Ordering::Relaxed) >= 1);
        assert!(stats.bytes_read.load(Ordering::Relaxed) > 0);
        assert!(stats.bytes_written.load(Ordering::Relaxed) > 0);

        drop(reader);
        drop(writer);

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(stats.active_connections.load(Ordering::Relaxed), 0);
    }
}
