//! Process-wide default logger and global extractor configuration
//!
//! The global configuration starts empty and is replaced wholesale by
//! [`set_global_extractors`]. It is read when a logger is built without
//! explicit extractors, including the default logger, which is built once on
//! the first free-function call and never rebuilt. A logger installed with
//! [`install_default_logger`] before that first call takes its place.

use crate::core::{Context, Extractor, LogLevel, Logger};
use parking_lot::{const_rwlock, RwLock};
use std::fmt;
use std::sync::OnceLock;

static GLOBAL_EXTRACTORS: RwLock<Vec<Extractor>> = const_rwlock(Vec::new());

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Replace the global extractor configuration
///
/// `None` items are dropped. An empty iterator clears the configuration.
/// Loggers that already exist are unaffected.
///
/// # Example
///
/// ```
/// use context_logger::{set_global_extractors, value_or_empty, Logger};
///
/// set_global_extractors([value_or_empty("request_id")]);
/// assert_eq!(Logger::new().extractor_count(), 1);
///
/// set_global_extractors(Vec::<context_logger::Extractor>::new());
/// assert_eq!(Logger::new().extractor_count(), 0);
/// ```
pub fn set_global_extractors<I, E>(extractors: I)
where
    I: IntoIterator<Item = E>,
    E: Into<Option<Extractor>>,
{
    let replacement: Vec<Extractor> = extractors
        .into_iter()
        .filter_map(Into::<Option<Extractor>>::into)
        .collect();
    *GLOBAL_EXTRACTORS.write() = replacement;
}

/// Snapshot of the global extractor configuration
pub fn global_extractors() -> Vec<Extractor> {
    GLOBAL_EXTRACTORS.read().clone()
}

/// The shared logger behind the free functions, built on first use
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::new)
}

/// Install `logger` as the default logger before any free-function call
///
/// Hands the logger back if the default logger already exists.
///
/// # Example
///
/// ```
/// use context_logger::prelude::*;
///
/// let sink = MemoryAppender::new();
/// let logger = Logger::builder()
///     .extractor(value_or_empty("request_id"))
///     .appender(sink.clone())
///     .build();
/// assert!(context_logger::install_default_logger(logger).is_ok());
///
/// let ctx = Context::background().with_value("request_id", "aaa");
/// context_logger::info(&ctx, "captured");
/// assert!(sink.contents().contains("|INFO|aaa|$ captured"));
///
/// assert!(context_logger::install_default_logger(Logger::new()).is_err());
/// ```
pub fn install_default_logger(logger: Logger) -> std::result::Result<(), Logger> {
    DEFAULT_LOGGER.set(logger)
}

pub fn is_default_initialized() -> bool {
    DEFAULT_LOGGER.get().is_some()
}

#[track_caller]
pub fn log(level: LogLevel, ctx: &Context, message: impl fmt::Display) {
    default_logger().log(level, ctx, message);
}

#[track_caller]
pub fn debug(ctx: &Context, message: impl fmt::Display) {
    default_logger().debug(ctx, message);
}

#[track_caller]
pub fn info(ctx: &Context, message: impl fmt::Display) {
    default_logger().info(ctx, message);
}

#[track_caller]
pub fn warn(ctx: &Context, message: impl fmt::Display) {
    default_logger().warn(ctx, message);
}

#[track_caller]
pub fn error(ctx: &Context, message: impl fmt::Display) {
    default_logger().error(ctx, message);
}
