//! Logging macros for ergonomic log message formatting.
//!
//! The level macros check the call-time gate first and only then format
//! their arguments, so disabled levels cost one atomic load. Each call
//! captures its [`LogSource`](crate::LogSource) with [`log_source!`].
//!
//! # Examples
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use rust_logger_facade::info;
//!
//! let logger = Logger::builder().writer(MemoryWriter::new()).build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Capture the current file, function, line and column as a `LogSource`.
///
/// ```
/// use rust_logger_facade::log_source;
///
/// fn handler() -> rust_logger_facade::LogSource {
///     log_source!()
/// }
///
/// let source = handler();
/// assert!(source.function.ends_with("handler"));
/// ```
#[macro_export]
macro_rules! log_source {
    () => {
        $crate::LogSource::new(
            ::std::file!(),
            $crate::__function_path!(),
            ::std::line!(),
            ::std::column!(),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use rust_logger_facade::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_enabled_for(level) {
            let message = ::std::format!($($arg)+);
            logger.log_str(level, move || message, $crate::log_source!());
        }
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use rust_logger_facade::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log an event-level message.
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use rust_logger_facade::event;
/// event!(logger, "checkout completed for order {}", 1042);
/// ```
#[macro_export]
macro_rules! event {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Event, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
