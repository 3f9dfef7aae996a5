//! Core logger types and traits

pub mod config;
pub mod error;
pub mod execution;
pub mod filter;
pub mod log_level;
pub mod log_message;
pub mod log_source;
pub mod logger;
pub mod metrics;
pub mod writer;

pub use config::{ExecutionMode, LoggerConfig};
pub use error::{LoggerError, Result};
pub use execution::{ExecutionMethod, SerialWorker, DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_WORKER_NAME};
pub use filter::{FnFilter, LogFilter};
pub use log_level::{LogLevel, LogLevels};
pub use log_message::LogMessage;
pub use log_source::LogSource;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use writer::LogWriter;
