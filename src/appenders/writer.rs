//! Appender over any `io::Write` target

use crate::core::{Appender, FormatterConfig, LogEntry, LoggerError, Result};
use std::io::Write;

/// Writes formatted lines to an arbitrary writer
///
/// # Example
///
/// ```
/// use context_logger::appenders::WriterAppender;
/// use context_logger::{Context, Logger};
///
/// let logger = Logger::builder()
///     .appender(WriterAppender::new(std::io::sink()))
///     .build();
/// logger.info(&Context::background(), "discarded");
/// ```
pub struct WriterAppender<W: Write + Send + Sync> {
    writer: W,
    formatter: FormatterConfig,
}

impl<W: Write + Send + Sync> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            formatter: FormatterConfig::default(),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> Appender for WriterAppender<W> {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.formatter.format_line(entry);
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::io_operation("writing log line", "writer rejected line", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}
