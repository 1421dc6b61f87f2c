//! Logging macros for ergonomic log message formatting.
//!
//! Each macro takes a logger, a context and a `format!`-style message. The
//! arguments are checked at compile time, and the recorded call site is the
//! macro invocation.
//!
//! # Examples
//!
//! ```
//! use context_logger::prelude::*;
//! use context_logger::info;
//!
//! let logger = Logger::builder()
//!     .extractor(value_or_empty("request_id"))
//!     .build();
//! let ctx = Context::background().with_value("request_id", "abc-123");
//!
//! info!(logger, &ctx, "Server started");
//!
//! let port = 8080;
//! info!(logger, &ctx, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = Logger::new();
/// # let ctx = Context::background();
/// use context_logger::log;
/// log!(logger, LogLevel::Info, &ctx, "Simple message");
/// log!(logger, LogLevel::Error, &ctx, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.log($level, $ctx, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = Logger::new();
/// # let ctx = Context::background();
/// use context_logger::debug;
/// debug!(logger, &ctx, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $ctx, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $ctx, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = Logger::new();
/// # let ctx = Context::background();
/// use context_logger::warn;
/// warn!(logger, &ctx, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $ctx, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $ctx, $($arg)+)
    };
}
