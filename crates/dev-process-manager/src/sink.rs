//! Console sinks.
//!
//! Everything the launcher shows its user goes through a [`LogSink`]:
//! multiplexed child lines, banners and diagnostics.

use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Which console stream a message targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Destination for console output.
pub trait LogSink: Send + Sync {
    /// Write one line to standard output.
    fn line(&self, text: &str);

    /// Write one line to standard error.
    fn error(&self, text: &str);
}

/// Writes to the process's real stdout/stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn line(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout must not take the launcher down.
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }

    fn error(&self, text: &str) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{}", text);
    }
}

/// Records every line in memory, in write order.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    entries: Arc<Mutex<Vec<(ConsoleStream, String)>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries.
    pub fn entries(&self) -> Vec<(ConsoleStream, String)> {
        self.entries.lock().clone()
    }

    /// Lines written to stdout.
    pub fn stdout_lines(&self) -> Vec<String> {
        self.lines_for(ConsoleStream::Stdout)
    }

    /// Lines written to stderr.
    pub fn stderr_lines(&self) -> Vec<String> {
        self.lines_for(ConsoleStream::Stderr)
    }

    /// Whether any line on either stream contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.lock().iter().any(|(_, line)| line.contains(needle))
    }

    /// Index of the first entry containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.entries
            .lock()
            .iter()
            .position(|(_, line)| line.contains(needle))
    }

    fn lines_for(&self, stream: ConsoleStream) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line.clone())
            .collect()
    }
}

impl LogSink for BufferSink {
    fn line(&self, text: &str) {
        self.entries
            .lock()
            .push((ConsoleStream::Stdout, text.to_string()));
    }

    fn error(&self, text: &str) {
        self.entries
            .lock()
            .push((ConsoleStream::Stderr, text.to_string()));
    }
}
