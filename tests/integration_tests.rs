//! Integration tests for the logger facade
//!
//! These tests verify:
//! - Level gating and lazy producers
//! - Filter chain vetoes and runtime filter edits
//! - Writer fan-out order and failure isolation
//! - The disabled logger
//! - Asynchronous ordering and shutdown

use rust_logger_facade::prelude::*;
use rust_logger_facade::{warn, MemoryRecord};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Records `(writer id, message)` into a log shared by several writers
struct SequenceWriter {
    id: usize,
    log: Arc<Mutex<Vec<(usize, String)>>>,
}

impl LogWriter for SequenceWriter {
    fn write_message(&self, message: &LogMessage, _level: LogLevel, _source: &LogSource) {
        self.log.lock().push((self.id, message.to_string()));
    }
}

fn counting_producer(counter: &Arc<AtomicUsize>, text: &'static str) -> impl FnOnce() -> String {
    let counter = Arc::clone(counter);
    move || {
        counter.fetch_add(1, Ordering::SeqCst);
        text.to_string()
    }
}

fn skip_filter() -> FnFilter<impl Fn(&LogMessage, LogLevel) -> bool + Send + Sync> {
    FnFilter::new("no-skip", |message: &LogMessage, _level: LogLevel| {
        !message.as_text().contains("skip")
    })
}

#[test]
fn test_warn_error_scenario() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::synchronous(LogLevels::WARN | LogLevels::ERROR, vec![memory.clone()]);
    logger.add_filter(skip_filter());

    logger.warn("skip this", LogSource::caller());
    assert_eq!(memory.len(), 0);

    logger.warn("keep this", LogSource::caller());
    let records: Vec<MemoryRecord> = memory.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Warn);
    assert_eq!(records[0].message, "keep this");

    let produced = Arc::new(AtomicUsize::new(0));
    logger.debug_str_with(counting_producer(&produced, "x"), LogSource::caller());
    assert_eq!(memory.len(), 1);
    assert_eq!(produced.load(Ordering::SeqCst), 0);
}

#[test]
fn test_disabled_levels_never_produce() {
    for configured in LogLevel::ALL {
        let memory = Arc::new(MemoryWriter::new());
        let logger = Logger::synchronous(LogLevels::from(configured), vec![memory.clone()]);
        let produced = Arc::new(AtomicUsize::new(0));

        for level in LogLevel::ALL.into_iter().filter(|level| *level != configured) {
            logger.log_str(level, counting_producer(&produced, "nope"), LogSource::caller());
        }

        assert_eq!(produced.load(Ordering::SeqCst), 0);
        assert!(memory.is_empty());
    }
}

#[test]
fn test_producer_runs_exactly_once_for_enabled_level() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::synchronous(LogLevels::ALL, vec![memory.clone()]);
    let produced = Arc::new(AtomicUsize::new(0));

    logger.info_str_with(counting_producer(&produced, "once"), LogSource::caller());

    assert_eq!(produced.load(Ordering::SeqCst), 1);
    assert_eq!(memory.messages(), vec!["once"]);
}

#[test]
fn test_every_writer_gets_the_same_triple_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let memory_a = Arc::new(MemoryWriter::new());
    let memory_b = Arc::new(MemoryWriter::new());
    let writers: Vec<Arc<dyn LogWriter>> = vec![
        Arc::new(SequenceWriter { id: 0, log: Arc::clone(&log) }),
        memory_a.clone(),
        Arc::new(SequenceWriter { id: 1, log: Arc::clone(&log) }),
        memory_b.clone(),
        Arc::new(SequenceWriter { id: 2, log: Arc::clone(&log) }),
    ];
    let logger = Logger::synchronous(LogLevels::ALL, writers);
    let source = LogSource::new("src/billing.rs", "billing::charge", 88, 13);

    logger.error("card declined", source.clone());

    assert_eq!(
        *log.lock(),
        vec![
            (0, "card declined".to_string()),
            (1, "card declined".to_string()),
            (2, "card declined".to_string()),
        ]
    );
    for memory in [&memory_a, &memory_b] {
        let records = memory.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "card declined");
        assert_eq!(records[0].level, LogLevel::Error);
        assert_eq!(records[0].source, source);
    }
}

#[test]
fn test_any_rejecting_filter_blocks_all_writers() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::synchronous(LogLevels::ALL, vec![memory.clone()]);

    logger.add_filter(FnFilter::new("allow", |_: &LogMessage, _: LogLevel| true));
    logger.add_filter(FnFilter::new("deny-info", |_: &LogMessage, level: LogLevel| {
        level != LogLevel::Info
    }));
    logger.add_filter(FnFilter::new("allow", |_: &LogMessage, _: LogLevel| true));

    logger.info("vetoed", LogSource::caller());
    logger.event("passes", LogSource::caller());

    assert_eq!(memory.messages(), vec!["passes"]);
    assert_eq!(logger.metrics().dropped_by_filter(), 1);
}

#[test]
fn test_filter_chain_stops_at_first_rejection() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::synchronous(LogLevels::ALL, vec![memory.clone()]);
    let later_calls = Arc::new(AtomicUsize::new(0));
    let later_calls_clone = Arc::clone(&later_calls);

    logger.add_filter(FnFilter::new("deny", |_: &LogMessage, _: LogLevel| false));
    logger.add_filter(FnFilter::new("count", move |_: &LogMessage, _: LogLevel| {
        later_calls_clone.fetch_add(1, Ordering::SeqCst);
        true
    }));

    logger.info("blocked", LogSource::caller());

    assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    assert!(memory.is_empty());
}

#[test]
fn test_filters_see_rich_messages() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::synchronous(LogLevels::ALL, vec![memory.clone()]);
    logger.add_filter(FnFilter::new("text-only", |message: &LogMessage, _: LogLevel| {
        message.is_text()
    }));

    logger.info(serde_json::json!({"order": 7}), LogSource::caller());
    logger.info_str("plain", LogSource::caller());

    assert_eq!(memory.messages(), vec!["plain"]);
}

#[test]
fn test_removing_filters_restores_dispatch() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::synchronous(LogLevels::ALL, vec![memory.clone()]);
    logger.add_filter(skip_filter());

    logger.info("skip 1", LogSource::caller());
    logger.remove_filter("no-skip");
    logger.info("skip 2", LogSource::caller());

    assert_eq!(memory.messages(), vec!["skip 2"]);

    logger.add_filter(skip_filter());
    logger.add_filter(skip_filter());
    logger.remove_filters();
    logger.remove_filters();
    assert!(logger.filter_names().unwrap().is_empty());
    logger.remove_filter("no-skip");
    assert!(logger.filter_names().unwrap().is_empty());
}

fn explode() -> String {
    panic!("macro arguments evaluated")
}

#[test]
fn test_disabled_logger_never_runs_producers() {
    let logger = Logger::disabled();
    let source = LogSource::caller();

    logger.debug_with(|| panic!("debug producer ran"), source.clone());
    logger.info_with(|| panic!("info producer ran"), source.clone());
    logger.event_with(|| panic!("event producer ran"), source.clone());
    logger.warn_with(|| panic!("warn producer ran"), source.clone());
    logger.error_with(|| panic!("error producer ran"), source.clone());
    logger.debug_str_with(|| panic!("debug producer ran"), source.clone());
    logger.info_str_with(|| panic!("info producer ran"), source.clone());
    logger.event_str_with(|| panic!("event producer ran"), source.clone());
    logger.warn_str_with(|| panic!("warn producer ran"), source.clone());
    logger.error_str_with(|| panic!("error producer ran"), source);

    warn!(logger, "{}", explode());

    assert!(!logger.is_enabled());
    assert_eq!(logger.levels(), LogLevels::OFF);
}

#[test]
fn test_failing_flush_is_reported_after_all_writers() {
    struct BrokenFlush;

    impl LogWriter for BrokenFlush {
        fn write_message(&self, _: &LogMessage, _: LogLevel, _: &LogSource) {}

        fn flush(&self) -> rust_logger_facade::Result<()> {
            Err(LoggerError::writer("broken", "device gone"))
        }
    }

    struct CountingFlush(AtomicUsize);

    impl LogWriter for CountingFlush {
        fn write_message(&self, _: &LogMessage, _: LogLevel, _: &LogSource) {}

        fn flush(&self) -> rust_logger_facade::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    let counting = Arc::new(CountingFlush(AtomicUsize::new(0)));
    let logger = Logger::synchronous(LogLevels::ALL, vec![Arc::new(BrokenFlush), counting.clone()]);

    let result = logger.flush();

    assert!(matches!(result, Err(LoggerError::WriterError { .. })));
    assert_eq!(counting.0.load(Ordering::SeqCst), 1);
}

#[test]
fn test_async_logging_runs_off_the_caller_thread() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::builder()
        .shared_writer(memory.clone())
        .asynchronous()
        .worker_name("integration-worker")
        .build()
        .unwrap();

    for i in 0..50 {
        logger.info(format!("Message {}", i), LogSource::caller());
    }
    logger.flush().unwrap();

    let records = memory.records();
    assert_eq!(records.len(), 50);
    assert!(records
        .iter()
        .all(|record| record.thread_name.as_deref() == Some("integration-worker")));
    let expected: Vec<String> = (0..50).map(|i| format!("Message {}", i)).collect();
    assert_eq!(memory.messages(), expected);
}

#[test]
fn test_async_fifo_with_interleaved_mutations() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let writer = Arc::new(SequenceWriter { id: 0, log: Arc::clone(&log) });
    let logger = Logger::new(
        LogLevels::ALL,
        vec![writer],
        ExecutionMethod::asynchronous_named("fifo-worker").unwrap(),
    );
    let worker = logger.execution_method().unwrap();

    // Every job below appends its label when the worker runs it
    let order = Arc::new(Mutex::new(Vec::<String>::new()));
    let producing = |label: &'static str| {
        let order = Arc::clone(&order);
        move || {
            order.lock().push(label.to_string());
            label.to_string()
        }
    };
    let marker = |label: &'static str| {
        let order = Arc::clone(&order);
        move || order.lock().push(label.to_string())
    };

    // Hold the worker inside its first job until everything below is queued
    let (entered_tx, entered_rx) = crossbeam_channel::bounded::<()>(1);
    let (release_tx, release_rx) = crossbeam_channel::bounded::<()>(1);
    worker.perform(move || {
        let _ = entered_tx.send(());
        let _ = release_rx.recv();
    });
    entered_rx.recv().unwrap();

    for label in ["before 0", "before 1", "before 2", "before 3", "before 4"] {
        logger.event_str_with(producing(label), LogSource::caller());
    }
    worker.perform(marker("levels requested"));
    logger.set_levels(LogLevels::ERROR);
    worker.perform(marker("levels applied"));
    logger.event_str_with(producing("after (dropped)"), LogSource::caller());
    logger.error_str_with(producing("after (kept)"), LogSource::caller());

    assert!(order.lock().is_empty());
    release_tx.send(()).unwrap();
    logger.flush().unwrap();

    // The level change ran between its two neighbours and nothing overtook it
    assert_eq!(
        *order.lock(),
        vec![
            "before 0",
            "before 1",
            "before 2",
            "before 3",
            "before 4",
            "levels requested",
            "levels applied",
            "after (kept)",
        ]
    );
    let messages: Vec<String> = log.lock().iter().map(|(_, m)| m.clone()).collect();
    assert_eq!(
        messages,
        vec!["before 0", "before 1", "before 2", "before 3", "before 4", "after (kept)"]
    );
}

#[test]
fn test_async_levels_apply_only_to_later_calls() {
    let memory = Arc::new(MemoryWriter::new());
    let logger = Logger::new(
        LogLevels::DEBUG,
        vec![memory.clone()],
        ExecutionMethod::asynchronous_named("levels-worker").unwrap(),
    );

    logger.debug("old levels", LogSource::caller());
    logger.set_levels(LogLevels::INFO);
    logger.debug("new levels drop debug", LogSource::caller());
    logger.info("new levels keep info", LogSource::caller());
    logger.flush().unwrap();

    assert_eq!(memory.messages(), vec!["old levels", "new levels keep info"]);
}

#[test]
fn test_graceful_shutdown_drains_queue() {
    let memory = Arc::new(MemoryWriter::new());

    {
        let logger = Logger::new(
            LogLevels::ALL,
            vec![memory.clone()],
            ExecutionMethod::asynchronous(),
        );

        for i in 0..10 {
            logger.info(format!("Message {}", i), LogSource::caller());
        }

        // Logger drops here - should drain and shut down gracefully
    }

    assert_eq!(memory.len(), 10);
}

#[test]
fn test_loggers_share_nothing() {
    let first_memory = Arc::new(MemoryWriter::new());
    let second_memory = Arc::new(MemoryWriter::new());
    let first = Logger::synchronous(LogLevels::ALL, vec![first_memory.clone()]);
    let second = Logger::synchronous(LogLevels::ALL, vec![second_memory.clone()]);

    first.add_filter(FnFilter::new("deny", |_: &LogMessage, _: LogLevel| false));
    first.set_levels(LogLevels::ERROR);

    second.info("unaffected", LogSource::caller());

    assert_eq!(second.levels(), LogLevels::ALL);
    assert!(second.filter_names().unwrap().is_empty());
    assert_eq!(second_memory.messages(), vec!["unaffected"]);
    assert!(first_memory.is_empty());
}
