//! Call-site metadata attached to every log call

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Where a log call was made.
///
/// Built by the caller at the call site (usually through
/// [`log_source!`](crate::log_source)) and handed to writers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogSource {
    pub file: Cow<'static, str>,
    pub function: Cow<'static, str>,
    pub line: u32,
    pub column: u32,
}

impl LogSource {
    pub fn new(
        file: impl Into<Cow<'static, str>>,
        function: impl Into<Cow<'static, str>>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            line,
            column,
        }
    }

    /// Capture the caller's file, line and column.
    ///
    /// Rust exposes no enclosing function name through `#[track_caller]`,
    /// so `function` is left empty; use the `log_source!` macro when it matters.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: Cow::Borrowed(location.file()),
            function: Cow::Borrowed(""),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)?;
        if !self.function.is_empty() {
            write!(f, " {}", self.function)?;
        }
        Ok(())
    }
}
