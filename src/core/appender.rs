//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A sink accepting sequential line writes
///
/// The logger serializes calls to one appender, so implementations only need
/// `&mut self` access.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
