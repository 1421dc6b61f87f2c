//! Basic logger usage example
//!
//! Demonstrates request-id tagging with an explicit logger, the global
//! configuration and the default instance.
//!
//! Run with: cargo run --example basic_usage

use context_logger::prelude::*;
use context_logger::info;

struct RequestId;

fn main() {
    println!("=== Context Logger - Basic Usage Example ===\n");

    let ctx = Context::background().with_typed::<RequestId, _>("aaa");

    println!("1. Explicit logger with a request-id extractor:");
    let logger = Logger::with_extractors([typed_or_empty::<RequestId>()]);
    logger.info(
        &ctx,
        format_args!("hello, welcome to the context logger. {}", "you will have a nice trip"),
    );
    info!(logger, &ctx, "macros format too: {} + {} = {}", 1, 2, 1 + 2);

    println!("\n2. All four levels:");
    logger.debug(&ctx, "This is a debug message");
    logger.info(&ctx, "This is an info message");
    logger.warn(&ctx, "This is a warning message");
    logger.error(&ctx, "This is an error message");

    println!("\n3. Global configuration seeds loggers built without extractors:");
    set_global_extractors([typed_or_empty::<RequestId>(), constant("demo")]);
    let seeded = Logger::new();
    seeded.info(&ctx, "tagged by the global configuration");

    println!("\n4. Free functions use the default instance:");
    context_logger::warn(&ctx, "default logger picks up the global configuration once");

    println!("\n=== Example completed successfully! ===");
}
