//! Main logger implementation

use super::{
    appender::Appender,
    context::Context,
    error::{LoggerError, Result},
    extractor::Extractor,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    timestamp::FormatterConfig,
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, Location};
use std::sync::Arc;

/// Written in place of the rest of a message whose formatting failed
pub const FORMAT_ERROR_MARKER: &str = "%!(FORMAT_ERROR)";

/// Tags every line with the output of its extractors
///
/// A logger never changes after construction. Clones share the extractor
/// list, the sink and the metrics, so a clone can be handed to each worker.
///
/// # Example
///
/// ```
/// use context_logger::{value_or_empty, Context, Logger};
///
/// let logger = Logger::with_extractors([value_or_empty("request_id")]);
/// let ctx = Context::background().with_value("request_id", "aaa");
///
/// // 2025/01/08 10:30:45.123456 main.rs:7: |INFO|aaa|$ hello, world
/// logger.info(&ctx, format_args!("hello, {}", "world"));
/// ```
#[derive(Clone)]
pub struct Logger {
    extractors: Arc<[Extractor]>,
    appender: Arc<Mutex<Box<dyn Appender>>>,
    /// Metrics for observability (lines written, failed writes)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger seeded from the global extractor configuration, writing to stdout
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Logger with explicit extractors, writing to stdout
    ///
    /// `None` items are skipped. An empty iterator falls back to the global
    /// extractor configuration, exactly like [`Logger::new`].
    #[must_use]
    pub fn with_extractors<I, E>(extractors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Option<Extractor>>,
    {
        Self::builder().extractors(extractors).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use context_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .extractor(value_or_empty("request_id"))
    ///     .appender(MemoryAppender::new())
    ///     .build();
    /// assert_eq!(logger.extractor_count(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn extractors(&self) -> &[Extractor] {
        &self.extractors
    }

    pub fn extractor_count(&self) -> usize {
        self.extractors.len()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, ctx: &Context, message: impl fmt::Display) {
        self.log(LogLevel::Debug, ctx, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, ctx: &Context, message: impl fmt::Display) {
        self.log(LogLevel::Info, ctx, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, ctx: &Context, message: impl fmt::Display) {
        self.log(LogLevel::Warn, ctx, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, ctx: &Context, message: impl fmt::Display) {
        self.log(LogLevel::Error, ctx, message);
    }

    /// Evaluate the extractors against `ctx` and write one line
    ///
    /// Extractors run before the sink is touched, so an extractor panic
    /// propagates to the caller without writing anything.
    #[track_caller]
    pub fn log(&self, level: LogLevel, ctx: &Context, message: impl fmt::Display) {
        let location = Location::caller();
        let tags: Vec<String> = self.extractors.iter().map(|extract| extract(ctx)).collect();
        let entry = LogEntry::new(level, tags, &render_message(message)).with_location(location);
        self.write_entry(&entry);
    }

    /// Hand an entry to the sink with panic isolation
    ///
    /// Sink errors and panics are reported on stderr and counted; they never
    /// reach the logging caller.
    fn write_entry(&self, entry: &LogEntry) {
        let mut appender = self.appender.lock();
        let append_result =
            std::panic::catch_unwind(AssertUnwindSafe(|| appender.append(entry)));

        match append_result {
            Ok(Ok(())) => {
                self.metrics.record_logged();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                self.metrics.record_failure();
            }
            Err(panic_info) => {
                let err =
                    LoggerError::appender_panicked(appender.name(), panic_message(&*panic_info));
                eprintln!("[LOGGER CRITICAL] {}", err);
                self.metrics.record_failure();
            }
        }
    }
}

/// Render a message, keeping whatever was written before a `Display` error
///
/// A failing `Display` impl leaves [`FORMAT_ERROR_MARKER`] inline instead of
/// aborting the call.
fn render_message(message: impl fmt::Display) -> String {
    let mut rendered = String::new();
    if fmt::write(&mut rendered, format_args!("{}", message)).is_err() {
        rendered.push_str(FORMAT_ERROR_MARKER);
    }
    rendered
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("extractors", &self.extractors.len())
            .field("appender", &self.appender.lock().name())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Extractors passed to the builder are used as given. When none are passed
/// at all, `build` snapshots the global configuration set by
/// [`set_global_extractors`](crate::set_global_extractors).
///
/// # Example
/// ```
/// use context_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .extractor(value_or_empty("request_id"))
///     .extractor(constant("billing"))
///     .formatter(FormatterConfig::new().with_utc(true))
///     .build();
/// assert_eq!(logger.extractor_count(), 2);
/// ```
pub struct LoggerBuilder {
    extractors: Option<Vec<Extractor>>,
    appender: Option<Box<dyn Appender>>,
    formatter: FormatterConfig,
    use_colors: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            extractors: None,
            appender: None,
            formatter: FormatterConfig::default(),
            use_colors: false,
        }
    }

    /// Bind one extractor; `None` counts as supplied but is skipped
    #[must_use = "builder methods return a new value"]
    pub fn extractor(self, extractor: impl Into<Option<Extractor>>) -> Self {
        self.extractors(std::iter::once(extractor))
    }

    /// Bind extractors in order
    ///
    /// An empty iterator leaves the builder unchanged.
    #[must_use = "builder methods return a new value"]
    pub fn extractors<I, E>(mut self, extractors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Option<Extractor>>,
    {
        for extractor in extractors {
            let bound = self.extractors.get_or_insert_with(Vec::new);
            if let Some(extractor) = extractor.into() {
                bound.push(extractor);
            }
        }
        self
    }

    /// Replace the default console sink
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    /// Line prefix configuration for the default console sink
    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Colour the level token of the default console sink
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn build(self) -> Logger {
        let extractors = match self.extractors {
            Some(bound) => bound,
            None => crate::global::global_extractors(),
        };
        let appender: Box<dyn Appender> = match self.appender {
            Some(appender) => appender,
            None => Box::new(
                ConsoleAppender::new()
                    .with_formatter(self.formatter)
                    .with_colors(self.use_colors),
            ),
        };

        Logger {
            extractors: extractors.into(),
            appender: Arc::new(Mutex::new(appender)),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::extractor::{constant, extractor, required_value};

    fn capture() -> MemoryAppender {
        MemoryAppender::new().with_formatter(FormatterConfig::new().with_include_timestamp(false))
    }

    fn request_ctx() -> Context {
        Context::background().with_value("request_id", "test-request-id")
    }

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::other("Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingAppender;

    impl Appender for PanickingAppender {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            panic!("sink exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_each_level_token() {
        let sink = capture();
        let logger = Logger::builder()
            .extractor(required_value("request_id"))
            .appender(sink.clone())
            .build();
        let ctx = request_ctx();

        logger.debug(&ctx, "debug message");
        logger.info(&ctx, "info message");
        logger.warn(&ctx, "warn message");
        logger.error(&ctx, "error message");

        let bodies: Vec<String> = sink.entries().iter().map(LogEntry::body).collect();
        assert_eq!(
            bodies,
            vec![
                "|DEBUG|test-request-id|$ debug message",
                "|INFO|test-request-id|$ info message",
                "|WARN|test-request-id|$ warn message",
                "|ERROR|test-request-id|$ error message",
            ]
        );
    }

    #[test]
    fn test_extractor_order_is_preserved() {
        let sink = capture();
        let logger = Logger::builder()
            .extractor(constant("first"))
            .extractor(constant("second"))
            .extractor(constant("first"))
            .appender(sink.clone())
            .build();

        logger.info(&Context::background(), "ordered");

        assert_eq!(sink.entries()[0].tags, vec!["first", "second", "first"]);
    }

    #[test]
    fn test_explicit_none_is_skipped_without_fallback() {
        let logger = Logger::builder()
            .extractor(None::<Extractor>)
            .appender(capture())
            .build();
        assert_eq!(logger.extractor_count(), 0);

        let logger = Logger::builder()
            .extractors([None, Some(constant("kept")), None])
            .appender(capture())
            .build();
        assert_eq!(logger.extractor_count(), 1);
    }

    #[test]
    fn test_format_arguments() {
        let sink = capture();
        let logger = Logger::builder()
            .extractor(constant("t"))
            .appender(sink.clone())
            .build();

        logger.info(&Context::background(), format_args!("hello, {}", "world"));

        assert_eq!(sink.entries()[0].message, "hello, world");
    }

    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_display_error_still_writes_a_line() {
        let sink = capture();
        let logger = Logger::builder()
            .extractor(constant("t"))
            .appender(sink.clone())
            .build();

        logger.info(&Context::background(), format_args!("value={}", Unprintable));
        logger.warn(&Context::background(), Unprintable);

        let bodies: Vec<String> = sink.entries().iter().map(LogEntry::body).collect();
        assert_eq!(
            bodies,
            vec![
                format!("|INFO|t|$ value={}", FORMAT_ERROR_MARKER),
                format!("|WARN|t|$ {}", FORMAT_ERROR_MARKER),
            ]
        );
        assert_eq!(logger.metrics().total_logged(), 2);
    }

    #[test]
    fn test_call_site_is_the_caller() {
        let sink = capture();
        let logger = Logger::builder()
            .extractor(None::<Extractor>)
            .appender(sink.clone())
            .build();

        let expected_line = line!() + 1;
        logger.warn(&Context::background(), "where");

        let entry = &sink.entries()[0];
        assert_eq!(entry.short_file(), "logger.rs");
        assert_eq!(entry.line, expected_line);
        let expected_prefix = format!("logger.rs:{}: |WARN|$ where", expected_line);
        assert!(sink.lines()[0].starts_with(&expected_prefix));
    }

    #[test]
    fn test_extractor_panic_propagates_without_writing() {
        let sink = capture();
        let logger = Logger::builder()
            .extractor(required_value("request_id"))
            .appender(sink.clone())
            .build();

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            logger.info(&Context::background(), "never written");
        }));

        assert!(result.is_err());
        assert!(sink.is_empty());
        assert_eq!(logger.metrics().total_logged(), 0);
    }

    #[test]
    fn test_extractor_sees_the_call_context() {
        let sink = capture();
        let logger = Logger::builder()
            .extractor(extractor(|ctx: &Context| ctx.len().to_string()))
            .appender(sink.clone())
            .build();

        logger.info(&Context::background(), "zero");
        logger.info(&request_ctx().with_value("user", "bob"), "two");

        let tags: Vec<Vec<String>> = sink.entries().into_iter().map(|e| e.tags).collect();
        assert_eq!(tags, vec![vec!["0".to_string()], vec!["2".to_string()]]);
    }

    #[test]
    fn test_sink_error_is_counted_not_raised() {
        let logger = Logger::builder()
            .extractor(None::<Extractor>)
            .appender(FailingAppender)
            .build();

        for _ in 0..5 {
            logger.info(&Context::background(), "Test message");
        }

        assert_eq!(logger.metrics().write_failures(), 5);
        assert_eq!(logger.metrics().total_logged(), 0);
    }

    #[test]
    fn test_sink_panic_is_isolated() {
        let logger = Logger::builder()
            .extractor(None::<Extractor>)
            .appender(PanickingAppender)
            .build();

        logger.error(&Context::background(), "boom");
        logger.error(&Context::background(), "boom again");

        assert_eq!(logger.metrics().write_failures(), 2);
    }

    #[test]
    fn test_clones_share_sink_and_metrics() {
        let sink = capture();
        let logger = Logger::builder()
            .extractor(constant("shared"))
            .appender(sink.clone())
            .build();
        let clone = logger.clone();

        logger.info(&Context::background(), "a");
        clone.info(&Context::background(), "b");

        assert_eq!(sink.len(), 2);
        assert_eq!(logger.metrics().total_logged(), 2);
        assert_eq!(clone.extractor_count(), 1);
    }

    #[test]
    fn test_flush_and_debug() {
        let logger = Logger::builder()
            .extractor(constant("x"))
            .appender(capture())
            .build();
        assert!(logger.flush().is_ok());

        let rendered = format!("{:?}", logger);
        assert!(rendered.contains("extractors: 1"));
        assert!(rendered.contains("memory"));
    }
}
