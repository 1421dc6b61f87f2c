//! Core logger types and traits

pub mod appender;
pub mod context;
pub mod error;
pub mod extractor;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use appender::Appender;
pub use context::{Context, ContextKey};
pub use error::{LoggerError, Result};
pub use extractor::{
    constant, extractor, required_value, typed_or_empty, value_or_empty, Extractor,
};
pub use log_entry::{LogEntry, BODY_SEPARATOR, TAG_DELIMITER};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, FORMAT_ERROR_MARKER};
pub use metrics::LoggerMetrics;
pub use timestamp::{FormatterConfig, TimestampFormat};
