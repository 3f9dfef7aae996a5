//! In-memory writer that keeps every dispatched message

use crate::core::{LogLevel, LogMessage, LogSource, LogWriter};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// One message as received by a [`MemoryWriter`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub source: LogSource,
    /// Name of the thread the writer ran on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
}

/// Records messages in arrival order.
///
/// Useful for tests and for embedders that want to inspect what a logger
/// dispatched.
///
/// # Example
///
/// ```
/// use rust_logger_facade::prelude::*;
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemoryWriter::new());
/// let logger = Logger::synchronous(LogLevels::ALL, vec![memory.clone()]);
///
/// logger.info("hello", LogSource::caller());
/// assert_eq!(memory.messages(), vec!["hello"]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryWriter {
    records: Mutex<Vec<MemoryRecord>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn records(&self) -> Vec<MemoryRecord> {
        self.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogWriter for MemoryWriter {
    fn write_message(&self, message: &LogMessage, level: LogLevel, source: &LogSource) {
        let record = MemoryRecord {
            timestamp: Utc::now(),
            level,
            message: message.as_text().into_owned(),
            source: source.clone(),
            thread_name: std::thread::current().name().map(String::from),
        };
        self.records.lock().push(record);
    }

    fn name(&self) -> &str {
        "memory"
    }
}
