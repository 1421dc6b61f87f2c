//! In-memory appender for capturing output

use crate::core::{Appender, FormatterConfig, LogEntry, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps every entry in memory; clones share the same storage
///
/// Handy in tests: hand one clone to the logger, read through the other.
///
/// # Example
///
/// ```
/// use context_logger::appenders::MemoryAppender;
/// use context_logger::{value_or_empty, Context, Logger};
///
/// let capture = MemoryAppender::new();
/// let logger = Logger::builder()
///     .extractor(value_or_empty("request_id"))
///     .appender(capture.clone())
///     .build();
///
/// let ctx = Context::background().with_value("request_id", "aaa");
/// logger.info(&ctx, format_args!("hello, {}", "world"));
///
/// assert!(capture.contents().contains("|INFO|aaa|$ hello, world"));
/// ```
#[derive(Clone, Default)]
pub struct MemoryAppender {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    formatter: FormatterConfig,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Captured entries rendered as lines
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|entry| self.formatter.format_line(entry))
            .collect()
    }

    /// All lines, newline-terminated
    pub fn contents(&self) -> String {
        self.lines().into_iter().map(|line| line + "\n").collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_clones_share_storage() {
        let capture = MemoryAppender::new()
            .with_formatter(FormatterConfig::new().with_include_timestamp(false));
        let mut sink = capture.clone();

        sink.append(&LogEntry::new(LogLevel::Debug, vec![], "one")).unwrap();
        sink.append(&LogEntry::new(LogLevel::Info, vec![], "two")).unwrap();

        assert_eq!(capture.len(), 2);
        assert_eq!(capture.lines(), vec!["|DEBUG|$ one", "|INFO|$ two"]);
        assert_eq!(capture.contents(), "|DEBUG|$ one\n|INFO|$ two\n");

        capture.clear();
        assert!(sink.is_empty());
    }
}
