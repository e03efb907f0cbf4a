//! Log handler for the template `log` side channel.
//!
//! `log` nodes never write to the template output; their rendered body
//! goes to a handler chosen by the embedder:
//! - Stdout (default for server rendering)
//! - Buffer (tests, capture-and-display embeddings)
//! - Silent (discard)

// Arc is the implementation of SharedLogHandler.
#![allow(clippy::disallowed_types)]

use parking_lot::Mutex;
use std::sync::Arc;

/// Default log handler that writes to stdout.
#[derive(Default)]
pub struct StdoutLogHandler;

impl StdoutLogHandler {
    /// Emit one log line.
    pub fn log(&self, msg: &str) {
        println!("{msg}");
    }
}

/// Log handler that captures output to a buffer.
pub struct BufferLogHandler {
    buffer: Mutex<String>,
}

impl BufferLogHandler {
    /// Create a new buffer log handler.
    pub fn new() -> Self {
        BufferLogHandler {
            buffer: Mutex::new(String::new()),
        }
    }

    /// Emit one log line.
    pub fn log(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Get all captured output.
    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Clear captured output.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferLogHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Log handler implementation using enum dispatch.
pub enum LogHandler {
    /// Writes to stdout (default).
    Stdout(StdoutLogHandler),
    /// Captures to a buffer (tests).
    Buffer(BufferLogHandler),
    /// Discards all log output silently.
    Silent,
}

impl LogHandler {
    /// Emit one log line.
    pub fn log(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.log(msg),
            Self::Buffer(h) => h.log(msg),
            Self::Silent => {}
        }
    }

    /// Get all captured output (empty for handlers that don't capture).
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Clear captured output.
    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared handle to a log handler.
pub type SharedLogHandler = Arc<LogHandler>;

/// Create a stdout-backed shared log handler.
pub fn stdout_handler() -> SharedLogHandler {
    Arc::new(LogHandler::Stdout(StdoutLogHandler))
}

/// Create a buffer-backed shared log handler.
pub fn buffer_handler() -> SharedLogHandler {
    Arc::new(LogHandler::Buffer(BufferLogHandler::new()))
}

/// Create a shared log handler that discards everything.
pub fn silent_handler() -> SharedLogHandler {
    Arc::new(LogHandler::Silent)
}
