//! Console appender implementation

use crate::core::{Appender, FormatterConfig, LogEntry, LogLevel, Result, TimestampFormat};
#[cfg(feature = "colors")]
use colored::Colorize;
use std::io::Write;

/// Writes every line, whatever its level, to standard output
pub struct ConsoleAppender {
    #[cfg_attr(not(feature = "colors"), allow(dead_code))]
    use_colors: bool,
    formatter: FormatterConfig,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: false,
            formatter: FormatterConfig::default(),
        }
    }

    /// Colour the level token; ignored without the `colors` feature
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use context_logger::appenders::ConsoleAppender;
    /// use context_logger::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.formatter = self.formatter.with_custom_timestamp(format_str);
        self
    }

    pub fn formatter(&self) -> &FormatterConfig {
        &self.formatter
    }

    fn format_text(&self, entry: &LogEntry) -> String {
        let mut line = self.formatter.prefix(entry);
        line.push_str(&entry.body_with_level(&self.level_token(entry.level)));
        line
    }

    #[cfg(feature = "colors")]
    fn level_token(&self, level: LogLevel) -> String {
        if self.use_colors {
            level.to_str().color(level.color_code()).to_string()
        } else {
            level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "colors"))]
    fn level_token(&self, level: LogLevel) -> String {
        level.to_str().to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.format_text(entry);
        line.push('\n');

        // One write per line keeps concurrent loggers from interleaving
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
