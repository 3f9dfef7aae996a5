//! Writer trait for log output destinations

use super::{error::Result, log_level::LogLevel, log_message::LogMessage, log_source::LogSource};

/// A destination for dispatched messages.
///
/// The logger calls `write_message` exactly once per dispatched message and
/// ignores the outcome: a writer that can fail must deal with its own
/// failures. Writers take `&self` because a writer that logs through the same
/// synchronous logger can be re-entered on the same thread.
pub trait LogWriter: Send + Sync {
    fn write_message(&self, message: &LogMessage, level: LogLevel, source: &LogSource);

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}
