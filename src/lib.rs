//! # Rust Logger Facade
//!
//! A dependency-injected logging facade. Callers emit leveled messages; a
//! [`Logger`] decides per call whether to build the message at all, runs it
//! through a chain of filters, and fans it out to pluggable writers, either
//! inline under a re-entrant lock or on a dedicated serial worker.
//!
//! ## Features
//!
//! - **Lazy messages**: producers run only past the level gate, at most once
//! - **Two execution methods**: synchronous (re-entrant lock) or
//!   asynchronous (single FIFO worker thread)
//! - **Runtime filters**: add and remove named filters while logging
//! - **No globals**: loggers are values you construct and pass around; the
//!   only shared instance is the inert [`Logger::disabled`]
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use rust_logger_facade::{info, warn};
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryWriter::new());
//! let logger = Logger::builder()
//!     .levels(LogLevels::WARN | LogLevels::ERROR)
//!     .shared_writer(memory.clone())
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "not enabled, never formatted");
//! warn!(logger, "disk at {}%", 91);
//!
//! assert_eq!(memory.messages(), vec!["disk at 91%"]);
//! ```

pub mod core;
pub mod macros;
pub mod writers;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::writers::ConsoleWriter;
    pub use crate::writers::MemoryWriter;
    pub use crate::core::{
        ExecutionMethod, ExecutionMode, FnFilter, LogFilter, LogLevel, LogLevels, LogMessage,
        LogSource, LogWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        Result, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

#[cfg(feature = "console")]
pub use writers::ConsoleWriter;
pub use writers::{MemoryRecord, MemoryWriter};
pub use core::{
    ExecutionMethod, ExecutionMode, FnFilter, LogFilter, LogLevel, LogLevels, LogMessage,
    LogSource, LogWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    Result, SerialWorker, DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_WORKER_NAME,
};
