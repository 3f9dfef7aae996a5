//! Filter trait for vetoing level-gated messages

use super::{log_level::LogLevel, log_message::LogMessage};
use std::fmt;

/// A named predicate consulted before any writer sees a message.
///
/// Filters run inside the logger's critical section (or on its serial
/// worker), so they should be cheap and free of side effects. The name is
/// what [`Logger::remove_filter`](crate::Logger::remove_filter) matches on;
/// duplicate names are allowed.
pub trait LogFilter: Send + Sync {
    fn name(&self) -> &str;

    /// Return `true` to let the message through
    fn should_include(&self, message: &LogMessage, level: LogLevel) -> bool;
}

/// A filter built from a closure.
///
/// # Example
///
/// ```
/// use rust_logger_facade::{FnFilter, LogFilter, LogLevel, LogMessage};
///
/// let no_skip = FnFilter::new("no-skip", |message, _level| {
///     !message.as_text().contains("skip")
/// });
/// assert!(!no_skip.should_include(&LogMessage::text("skip me"), LogLevel::Warn));
/// ```
pub struct FnFilter<F> {
    name: String,
    predicate: F,
}

impl<F> FnFilter<F>
where
    F: Fn(&LogMessage, LogLevel) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> LogFilter for FnFilter<F>
where
    F: Fn(&LogMessage, LogLevel) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn should_include(&self, message: &LogMessage, level: LogLevel) -> bool {
        (self.predicate)(message, level)
    }
}

impl<F> fmt::Debug for FnFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_filter() {
        let errors_only = FnFilter::new("errors-only", |_message, level| level == LogLevel::Error);
        assert_eq!(errors_only.name(), "errors-only");
        assert!(errors_only.should_include(&LogMessage::text("x"), LogLevel::Error));
        assert!(!errors_only.should_include(&LogMessage::text("x"), LogLevel::Warn));
    }
}
