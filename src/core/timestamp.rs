//! Timestamp formatting and line prefix configuration
//!
//! The prefix written before every line body is `<timestamp> <file>:<line>: `,
//! both parts configurable through [`FormatterConfig`].

use super::log_entry::LogEntry;
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use context_logger::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Standard.format(&at), "2025/01/08 10:30:45.000000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Date, time and microseconds: `2025/01/08 10:30:45.123456`
    #[default]
    Standard,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456`
    Iso8601Micros,

    /// RFC 3339 with offset: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    ///
    /// ```
    /// use context_logger::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Standard => datetime.format("%Y/%m/%d %H:%M:%S%.6f").to_string(),
            TimestampFormat::Iso8601Micros => {
                datetime.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
            }
            TimestampFormat::Rfc3339 => datetime.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Configuration for the line prefix written by console and writer sinks
///
/// Defaults to local time with microseconds and the short call-site file,
/// e.g. `2025/01/08 10:30:45.123456 handler.rs:42: `.
///
/// # Examples
///
/// ```
/// use context_logger::core::{FormatterConfig, TimestampFormat};
///
/// let config = FormatterConfig::new()
///     .with_timestamp_format(TimestampFormat::Rfc3339)
///     .with_utc(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub timestamp_format: TimestampFormat,
    pub include_timestamp: bool,
    /// Whether to include `file:line:` of the call site
    pub include_file_location: bool,
    /// Render timestamps in UTC instead of local time
    pub use_utc: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            include_timestamp: true,
            include_file_location: true,
            use_utc: false,
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    #[must_use]
    pub fn with_include_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    #[must_use]
    pub fn with_include_file_location(mut self, include: bool) -> Self {
        self.include_file_location = include;
        self
    }

    #[must_use]
    pub fn with_utc(mut self, use_utc: bool) -> Self {
        self.use_utc = use_utc;
        self
    }

    /// Render the sink-supplied part of the line: timestamp and call site
    pub fn prefix(&self, entry: &LogEntry) -> String {
        let mut prefix = String::new();
        if self.include_timestamp {
            let stamp = if self.use_utc {
                self.timestamp_format.format(&entry.timestamp)
            } else {
                self.timestamp_format
                    .format(&entry.timestamp.with_timezone(&Local))
            };
            prefix.push_str(&stamp);
            prefix.push(' ');
        }
        if self.include_file_location && !entry.file.is_empty() {
            prefix.push_str(entry.short_file());
            prefix.push(':');
            prefix.push_str(&entry.line.to_string());
            prefix.push_str(": ");
        }
        prefix
    }

    /// Full line without trailing newline
    pub fn format_line(&self, entry: &LogEntry) -> String {
        let mut line = self.prefix(entry);
        line.push_str(&entry.body());
        line
    }
}
