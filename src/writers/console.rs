//! Console writer implementation

use crate::core::{LogLevel, LogMessage, LogSource, LogWriter, Result};
use chrono::Utc;
use colored::Colorize;
use std::io::Write;

/// Default chrono format for the timestamp column
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Writes one line per message; `Error` goes to stderr, the rest to stdout.
pub struct ConsoleWriter {
    use_colors: bool,
    timestamp_format: String,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set a strftime-compatible timestamp format
    ///
    /// ```
    /// use rust_logger_facade::writers::ConsoleWriter;
    ///
    /// let writer = ConsoleWriter::new().with_timestamp_format("%H:%M:%S");
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    fn format_line(&self, message: &LogMessage, level: LogLevel, source: &LogSource) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", level.to_str())
                .color(level.color_code())
                .to_string()
        } else {
            format!("{:5}", level.to_str())
        };

        format!(
            "[{}] [{}] {} - {}",
            Utc::now().format(&self.timestamp_format),
            level_str,
            source,
            message
        )
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for ConsoleWriter {
    fn write_message(&self, message: &LogMessage, level: LogLevel, source: &LogSource) {
        let line = self.format_line(message, level, source);

        // A closed pipe is not the logger's concern
        let _ = match level {
            LogLevel::Error => writeln!(std::io::stderr().lock(), "{}", line),
            _ => writeln!(std::io::stdout().lock(), "{}", line),
        };
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_layout() {
        let writer = ConsoleWriter::with_colors(false).with_timestamp_format("T");
        let line = writer.format_line(
            &LogMessage::text("ready"),
            LogLevel::Info,
            &LogSource::new("src/main.rs", "app::main", 4, 9),
        );
        assert_eq!(line, "[T] [INFO ] src/main.rs:4:9 app::main - ready");
    }
}
