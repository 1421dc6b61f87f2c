//! Log entry structure and line body assembly

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::panic::Location;

/// Delimiter between the level token and each tag
pub const TAG_DELIMITER: char = '|';

/// Separator between the tag group and the message body
pub const BODY_SEPARATOR: &str = "$ ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Extractor outputs, in binding order
    pub tags: Vec<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub file: &'static str,
    pub line: u32,
}

impl LogEntry {
    /// Sanitize text to prevent log injection attacks
    ///
    /// Backslashes are doubled first, then newlines, carriage returns and
    /// tabs become escape sequences. Distinct inputs stay distinct and no
    /// input can start a fake entry on a new line.
    fn sanitize(text: &str) -> String {
        if !text.contains(['\\', '\n', '\r', '\t']) {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len() + 8);
        for c in text.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out
    }

    /// Tags and message are escaped the same way
    pub fn new(level: LogLevel, tags: Vec<String>, message: &str) -> Self {
        Self {
            level,
            tags: tags.into_iter().map(|tag| Self::sanitize(&tag)).collect(),
            message: Self::sanitize(message),
            timestamp: Utc::now(),
            file: "",
            line: 0,
        }
    }

    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.file = location.file();
        self.line = location.line();
        self
    }

    /// Final path component of the call-site file
    pub fn short_file(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }

    /// `|LEVEL|tag1|...|tagN|$ message`
    pub fn body(&self) -> String {
        self.body_with_level(self.level.to_str())
    }

    /// Same as [`body`](Self::body) with a caller-rendered level token
    pub fn body_with_level(&self, level: &str) -> String {
        let tags_len: usize = self.tags.iter().map(|t| t.len() + 1).sum();
        let mut out = String::with_capacity(
            level.len() + tags_len + self.message.len() + BODY_SEPARATOR.len() + 2,
        );
        out.push(TAG_DELIMITER);
        out.push_str(level);
        for tag in &self.tags {
            out.push(TAG_DELIMITER);
            out.push_str(tag);
        }
        out.push(TAG_DELIMITER);
        let _ = write!(out, "{}{}", BODY_SEPARATOR, self.message);
        out
    }
}
