//! Main logger implementation
//!
//! A log call goes through two gates before anything user-supplied runs.
//! The call-time gate reads the most recently requested level set from an
//! atomic and drops disabled levels without scheduling work. The work then
//! re-checks the level against the set actually applied by the execution
//! method, so a level change queued on the serial worker only affects calls
//! queued after it. Past both gates the producer runs once, the filter chain
//! decides, and every writer receives the message.

use super::{
    config::{ExecutionMode, LoggerConfig},
    error::{panic_message, Result},
    execution::{ExecutionMethod, DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_WORKER_NAME},
    filter::LogFilter,
    log_level::{LogLevel, LogLevels},
    log_message::LogMessage,
    log_source::LogSource,
    metrics::LoggerMetrics,
    writer::LogWriter,
};
use parking_lot::{Mutex, ReentrantMutex};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

static DISABLED: Logger = Logger { engine: None };

static NO_METRICS: LoggerMetrics = LoggerMetrics::new();

pub struct Logger {
    /// `None` only for the disabled logger
    engine: Option<Engine>,
}

struct Engine {
    shared: Arc<Shared>,
    execution: ExecutionMethod,
}

/// State reachable from queued work
struct Shared {
    /// Level set last requested through `set_levels`; read by the call-time gate
    requested_levels: AtomicU8,
    /// Held while an asynchronous `set_levels` stores and enqueues
    level_order: Mutex<()>,
    state: Mutex<DispatchState>,
    writers: Box<[Arc<dyn LogWriter>]>,
    metrics: LoggerMetrics,
}

/// Mutated only from inside the execution method
struct DispatchState {
    levels: LogLevels,
    filters: Arc<Vec<Arc<dyn LogFilter>>>,
}

macro_rules! level_methods {
    ($($level:ident => $value:ident, $with:ident, $text:ident, $text_with:ident;)+) => {
        $(
            #[doc = concat!("Log a message at `", stringify!($level), "`; converted only past the level gate")]
            #[inline]
            pub fn $value(&self, message: impl Into<LogMessage> + Send + 'static, source: LogSource) {
                self.log(LogLevel::$level, move || message.into(), source);
            }

            #[doc = concat!("Log at `", stringify!($level), "` with a lazily evaluated message")]
            #[inline]
            pub fn $with<F>(&self, producer: F, source: LogSource)
            where
                F: FnOnce() -> LogMessage + Send + 'static,
            {
                self.log(LogLevel::$level, producer, source);
            }

            #[inline]
            pub fn $text(&self, message: impl Into<String> + Send + 'static, source: LogSource) {
                self.log_str(LogLevel::$level, move || message.into(), source);
            }

            #[inline]
            pub fn $text_with<F>(&self, producer: F, source: LogSource)
            where
                F: FnOnce() -> String + Send + 'static,
            {
                self.log_str(LogLevel::$level, producer, source);
            }
        )+
    };
}

impl Logger {
    /// Create a logger dispatching to `writers` in order.
    ///
    /// The writer list is fixed for the logger's lifetime.
    #[must_use]
    pub fn new(
        levels: LogLevels,
        writers: Vec<Arc<dyn LogWriter>>,
        execution: ExecutionMethod,
    ) -> Self {
        Self::with_filters(levels, writers, Vec::new(), execution)
    }

    /// Create a synchronous logger with a fresh re-entrant lock
    #[must_use]
    pub fn synchronous(levels: LogLevels, writers: Vec<Arc<dyn LogWriter>>) -> Self {
        Self::new(levels, writers, ExecutionMethod::synchronous())
    }

    pub(crate) fn with_filters(
        levels: LogLevels,
        writers: Vec<Arc<dyn LogWriter>>,
        filters: Vec<Arc<dyn LogFilter>>,
        execution: ExecutionMethod,
    ) -> Self {
        let shared = Shared {
            requested_levels: AtomicU8::new(levels.bits()),
            level_order: Mutex::new(()),
            state: Mutex::new(DispatchState {
                levels,
                filters: Arc::new(filters),
            }),
            writers: writers.into_boxed_slice(),
            metrics: LoggerMetrics::new(),
        };

        Self {
            engine: Some(Engine {
                shared: Arc::new(shared),
                execution,
            }),
        }
    }

    /// The permanently disabled logger.
    ///
    /// Its levels are [`LogLevels::OFF`] and every call returns before doing
    /// any work: producers, filters and writers are never touched.
    ///
    /// ```
    /// use rust_logger_facade::{LogSource, Logger};
    ///
    /// let logger = Logger::disabled();
    /// logger.error_with(|| unreachable!(), LogSource::caller());
    /// assert!(!logger.is_enabled());
    /// ```
    #[inline]
    pub fn disabled() -> &'static Logger {
        &DISABLED
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.engine.is_some()
    }

    /// The most recently requested level set
    pub fn levels(&self) -> LogLevels {
        match self.engine {
            Some(ref engine) => {
                LogLevels::from_bits(engine.shared.requested_levels.load(Ordering::Acquire))
            }
            None => LogLevels::OFF,
        }
    }

    /// Whether a call at `level` would pass the call-time gate
    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.levels().contains(level)
    }

    pub fn execution_method(&self) -> Option<&ExecutionMethod> {
        self.engine.as_ref().map(|engine| &engine.execution)
    }

    pub fn writer_count(&self) -> usize {
        self.engine
            .as_ref()
            .map_or(0, |engine| engine.shared.writers.len())
    }

    /// Get the logger metrics for observability
    ///
    /// The disabled logger reports all zeroes.
    pub fn metrics(&self) -> &LoggerMetrics {
        match self.engine {
            Some(ref engine) => &engine.shared.metrics,
            None => &NO_METRICS,
        }
    }

    /// Log a lazily produced message.
    ///
    /// `producer` runs at most once, on the execution method, and only when
    /// `level` is enabled both now and when the work runs.
    pub fn log<F>(&self, level: LogLevel, producer: F, source: LogSource)
    where
        F: FnOnce() -> LogMessage + Send + 'static,
    {
        let Some(ref engine) = self.engine else {
            return;
        };

        if !self.is_enabled_for(level) {
            engine.shared.metrics.record_level_drop();
            return;
        }

        let shared = Arc::clone(&engine.shared);
        engine
            .execution
            .perform(move || shared.dispatch(level, producer, &source));
    }

    /// Log a lazily produced plain string
    pub fn log_str<F>(&self, level: LogLevel, producer: F, source: LogSource)
    where
        F: FnOnce() -> String + Send + 'static,
    {
        self.log(level, move || LogMessage::Text(producer()), source);
    }

    level_methods! {
        Debug => debug, debug_with, debug_str, debug_str_with;
        Info => info, info_with, info_str, info_str_with;
        Event => event, event_with, event_str, event_str_with;
        Warn => warn, warn_with, warn_str, warn_str_with;
        Error => error, error_with, error_str, error_str_with;
    }

    /// Replace the enabled level set.
    ///
    /// Under asynchronous execution the change is queued behind every call
    /// already submitted; under synchronous execution it applies once the
    /// lock is acquired.
    pub fn set_levels(&self, levels: LogLevels) {
        let Some(ref engine) = self.engine else {
            return;
        };

        let shared = Arc::clone(&engine.shared);

        if engine.execution.is_synchronous() {
            engine.execution.perform(move || {
                shared.state.lock().levels = levels;
                shared
                    .requested_levels
                    .store(levels.bits(), Ordering::Release);
            });
            return;
        }

        // Stores happen in queue order, so the last request published is
        // also the last one applied
        let _order = engine.shared.level_order.lock();
        engine
            .shared
            .requested_levels
            .store(levels.bits(), Ordering::Release);
        engine.execution.perform(move || {
            shared.state.lock().levels = levels;
        });
    }

    /// Append a filter to the end of the chain
    pub fn add_filter<F>(&self, filter: F)
    where
        F: LogFilter + 'static,
    {
        self.add_shared_filter(Arc::new(filter));
    }

    pub fn add_shared_filter(&self, filter: Arc<dyn LogFilter>) {
        self.mutate_filters(move |filters| filters.push(filter));
    }

    /// Remove every filter named `name`; nothing happens if none match
    pub fn remove_filter(&self, name: impl Into<String>) {
        let name = name.into();
        self.mutate_filters(move |filters| filters.retain(|filter| filter.name() != name));
    }

    /// Remove all filters
    pub fn remove_filters(&self) {
        self.mutate_filters(Vec::clear);
    }

    /// Names of the current filters, in chain order.
    ///
    /// Waits for queued work, so the answer reflects every mutation made
    /// before this call.
    pub fn filter_names(&self) -> Result<Vec<String>> {
        let Some(ref engine) = self.engine else {
            return Ok(Vec::new());
        };

        let shared = Arc::clone(&engine.shared);
        engine.execution.perform_and_wait(move || {
            shared
                .state
                .lock()
                .filters
                .iter()
                .map(|filter| filter.name().to_string())
                .collect()
        })
    }

    /// Flush every writer after all previously submitted work has run.
    ///
    /// Every writer is flushed even if an earlier one fails; the first
    /// failure is returned.
    pub fn flush(&self) -> Result<()> {
        let Some(ref engine) = self.engine else {
            return Ok(());
        };

        let shared = Arc::clone(&engine.shared);
        engine
            .execution
            .perform_and_wait(move || shared.flush_writers())?
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Drains the serial worker (if any), then flushes the writers. If the
    /// worker is still busy when `timeout` expires the writers are left
    /// alone. Later log calls on an asynchronous logger are discarded.
    ///
    /// **Note**: Dropping the logger does the same with
    /// [`DEFAULT_SHUTDOWN_TIMEOUT`].
    ///
    /// # Returns
    ///
    /// `true` if every queued call ran within `timeout` and the writers
    /// flushed cleanly.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        match self.engine {
            Some(ref mut engine) => engine.shutdown(timeout),
            None => true,
        }
    }

    fn mutate_filters<F>(&self, edit: F)
    where
        F: FnOnce(&mut Vec<Arc<dyn LogFilter>>) + Send + 'static,
    {
        let Some(ref engine) = self.engine else {
            return;
        };

        let shared = Arc::clone(&engine.shared);
        engine.execution.perform(move || {
            let mut state = shared.state.lock();
            // Copy-on-write: a dispatch iterating the old chain keeps its snapshot
            edit(Arc::make_mut(&mut state.filters));
        });
    }
}

impl Engine {
    fn shutdown(&mut self, timeout: Duration) -> bool {
        if !self.execution.shutdown(timeout) {
            // Writers are only called from the execution method; the worker may still be in one
            eprintln!("[LOGGER WARNING] Serial worker still running. Writers were not flushed.");
            return false;
        }

        let flushed = if self.execution.is_synchronous() {
            let shared = Arc::clone(&self.shared);
            self.execution
                .perform_and_wait(move || shared.flush_writers())
                .and_then(|result| result)
        } else {
            self.shared.flush_writers()
        };

        if let Err(e) = flushed {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }

        true
    }
}

impl Shared {
    fn dispatch<F>(&self, level: LogLevel, producer: F, source: &LogSource)
    where
        F: FnOnce() -> LogMessage,
    {
        // The lock is not held across producer, filter or writer calls, so
        // re-entrant logging from any of them cannot deadlock on it
        let filters = {
            let state = self.state.lock();
            if !state.levels.contains(level) {
                self.metrics.record_level_drop();
                return;
            }
            Arc::clone(&state.filters)
        };

        let message = producer();

        if !filters
            .iter()
            .all(|filter| filter.should_include(&message, level))
        {
            self.metrics.record_filtered();
            return;
        }

        self.fan_out(&message, level, source);
    }

    /// Hand the message to every writer in order
    ///
    /// **Per-Writer Panic Isolation**: each writer call is wrapped in
    /// catch_unwind so one failing writer cannot starve the ones after it.
    fn fan_out(&self, message: &LogMessage, level: LogLevel, source: &LogSource) {
        for (idx, writer) in self.writers.iter().enumerate() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                writer.write_message(message, level, source)
            }));

            if let Err(panic_info) = outcome {
                self.metrics.record_writer_failure();
                eprintln!(
                    "[LOGGER CRITICAL] Writer #{} ('{}') panicked: {}. \
                     Other writers continue to function.",
                    idx,
                    writer.name(),
                    panic_message(panic_info.as_ref())
                );
            }
        }

        self.metrics.record_dispatched();
    }

    fn flush_writers(&self) -> Result<()> {
        let mut first_error = None;

        for (idx, writer) in self.writers.iter().enumerate() {
            if let Err(e) = writer.flush() {
                eprintln!("[LOGGER ERROR] Writer #{} flush failed: {}", idx, e);
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Some(ref mut engine) = self.engine {
            engine.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.engine {
            Some(ref engine) => f
                .debug_struct("Logger")
                .field("levels", &self.levels())
                .field("writers", &engine.shared.writers.len())
                .field("execution", &engine.execution)
                .finish(),
            None => f.debug_struct("Logger").field("enabled", &false).finish(),
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logger_facade::prelude::*;
///
/// let logger = Logger::builder()
///     .levels(LogLevels::at_least(LogLevel::Info))
///     .writer(MemoryWriter::new())
///     .filter(FnFilter::new("no-health-checks", |message, _level| {
///         !message.as_text().contains("/healthz")
///     }))
///     .asynchronous()
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.writer_count(), 1);
/// ```
pub struct LoggerBuilder {
    levels: LogLevels,
    writers: Vec<Arc<dyn LogWriter>>,
    filters: Vec<Arc<dyn LogFilter>>,
    mode: ExecutionMode,
    worker_name: Option<String>,
    shared_mutex: Option<Arc<ReentrantMutex<()>>>,
}

impl LoggerBuilder {
    /// Create a new builder: every level enabled, synchronous, no writers
    pub fn new() -> Self {
        Self {
            levels: LogLevels::ALL,
            writers: Vec::new(),
            filters: Vec::new(),
            mode: ExecutionMode::Synchronous,
            worker_name: None,
            shared_mutex: None,
        }
    }

    /// Start from a deserialized [`LoggerConfig`]
    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            levels: config.levels,
            mode: config.execution,
            worker_name: config.worker_name,
            ..Self::new()
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: LogLevels) -> Self {
        self.levels = levels;
        self
    }

    /// Add one level to the set
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.levels |= level;
        self
    }

    /// Append a writer; writers receive messages in the order added
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: LogWriter + 'static>(mut self, writer: W) -> Self {
        self.writers.push(Arc::new(writer));
        self
    }

    /// Append a writer the caller keeps a handle to
    #[must_use = "builder methods return a new value"]
    pub fn shared_writer(mut self, writer: Arc<dyn LogWriter>) -> Self {
        self.writers.push(writer);
        self
    }

    /// Start the filter chain with `filter`
    #[must_use = "builder methods return a new value"]
    pub fn filter<F: LogFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn synchronous(mut self) -> Self {
        self.mode = ExecutionMode::Synchronous;
        self
    }

    /// Synchronous execution under a lock shared with other loggers
    #[must_use = "builder methods return a new value"]
    pub fn shared_mutex(mut self, mutex: Arc<ReentrantMutex<()>>) -> Self {
        self.mode = ExecutionMode::Synchronous;
        self.shared_mutex = Some(mutex);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn asynchronous(mut self) -> Self {
        self.mode = ExecutionMode::Asynchronous;
        self
    }

    /// Thread name of the serial worker
    #[must_use = "builder methods return a new value"]
    pub fn worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = Some(name.into());
        self
    }

    /// Build the Logger
    ///
    /// Fails only when the serial worker cannot be started.
    pub fn build(self) -> Result<Logger> {
        let execution = match self.mode {
            ExecutionMode::Synchronous => match self.shared_mutex {
                Some(mutex) => ExecutionMethod::synchronous_with(mutex),
                None => ExecutionMethod::synchronous(),
            },
            ExecutionMode::Asynchronous => ExecutionMethod::asynchronous_named(
                self.worker_name
                    .unwrap_or_else(|| DEFAULT_WORKER_NAME.to_string()),
            )?,
        };

        Ok(Logger::with_filters(
            self.levels,
            self.writers,
            self.filters,
            execution,
        ))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
