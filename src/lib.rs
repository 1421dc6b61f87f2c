//! # Context Logger
//!
//! A small logging facade that tags every line with values pulled from a
//! request context.
//!
//! Each [`Logger`] holds an ordered list of *extractors*, functions from a
//! [`Context`] to a string. Every call evaluates them against the context it
//! was given and writes
//!
//! ```text
//! 2025/01/08 10:30:45.123456 handler.rs:42: |INFO|req-7|alice|$ order placed
//! ```
//!
//! The level comes first, then one tag per extractor in binding order, then
//! `$ ` and the message.
//!
//! ## Features
//!
//! - **Contextual tags**: request ids and similar values on every line
//! - **Default instance**: free functions backed by a lazily built logger
//! - **Global configuration**: extractors shared by loggers built without any
//! - **Thread Safe**: loggers are immutable and can be cloned across threads
//!
//! ```
//! use context_logger::prelude::*;
//!
//! set_global_extractors([value_or_empty("request_id")]);
//!
//! let ctx = Context::background().with_value("request_id", "aaa");
//! context_logger::info(&ctx, format_args!("hello, {}", "world"));
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender, WriterAppender};
    pub use crate::core::{
        constant, extractor, required_value, typed_or_empty, value_or_empty, Appender, Context,
        Extractor, FormatterConfig, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, Result, TimestampFormat,
    };
    pub use crate::global::{default_logger, global_extractors, set_global_extractors};
}

pub use crate::appenders::{ConsoleAppender, MemoryAppender, WriterAppender};
pub use crate::core::{
    constant, extractor, required_value, typed_or_empty, value_or_empty, Appender, Context,
    ContextKey, Extractor, FormatterConfig, LogEntry, LogLevel, Logger, LoggerBuilder,
    LoggerError, LoggerMetrics, Result, TimestampFormat, FORMAT_ERROR_MARKER,
};
pub use crate::global::{
    debug, default_logger, error, global_extractors, info, install_default_logger,
    is_default_initialized, log, set_global_extractors, warn,
};
