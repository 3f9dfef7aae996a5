//! Basic logger usage example
//!
//! Demonstrates synchronous and asynchronous logging to the console, level
//! sets, and filters.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_facade::prelude::*;
use rust_logger_facade::{error, event, info, warn};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Logger Facade - Basic Usage Example ===\n");

    // Create a synchronous logger writing to the console
    let logger = Logger::builder().writer(ConsoleWriter::new()).build()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", LogSource::caller());
    info!(logger, "This is an info message");
    event!(logger, "user {} signed up", 42);
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");

    println!("\n2. Replacing the level set:");
    logger.set_levels(LogLevels::WARN | LogLevels::ERROR);
    println!("   Levels set to {} - debug, info and event won't show:", logger.levels());
    info!(logger, "Info message (hidden)");
    warn!(logger, "Warning message (visible)");
    logger.set_levels(LogLevels::ALL);

    println!("\n3. Filters:");
    logger.add_filter(FnFilter::new("no-health-checks", |message, _level| {
        !message.as_text().contains("/healthz")
    }));
    info!(logger, "GET /healthz 200 (hidden)");
    info!(logger, "GET /orders 200 (visible)");
    println!("   Active filters: {:?}", logger.filter_names()?);
    logger.remove_filter("no-health-checks");
    info!(logger, "GET /healthz 200 (visible again)");

    println!("\n4. Asynchronous logging on a serial worker:");
    let memory = Arc::new(MemoryWriter::new());
    let mut async_logger = Logger::builder()
        .writer(ConsoleWriter::new())
        .shared_writer(memory.clone())
        .asynchronous()
        .worker_name("demo-worker")
        .build()?;

    for i in 0..5 {
        info!(async_logger, "Queued message #{}", i);
    }
    async_logger.flush()?;
    println!("   Worker delivered {} messages", memory.len());

    if !async_logger.shutdown(Duration::from_secs(5)) {
        eprintln!("   Worker did not drain in time");
    }

    let metrics = logger.metrics();
    println!(
        "\n   Sync logger: {} dispatched, {} dropped by level, {} dropped by filter",
        metrics.dispatched(),
        metrics.dropped_by_level(),
        metrics.dropped_by_filter()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
