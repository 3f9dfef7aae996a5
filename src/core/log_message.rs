//! Message payloads carried from a log call to filters and writers

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// The materialized message of a log call.
///
/// Either plain text or a caller-defined value. Filters and writers that
/// only care about text use [`LogMessage::as_text`]; those that understand
/// richer payloads match on the variant.
#[derive(Clone)]
pub enum LogMessage {
    Text(String),
    Value(Arc<dyn fmt::Display + Send + Sync>),
}

impl LogMessage {
    pub fn text(message: impl Into<String>) -> Self {
        LogMessage::Text(message.into())
    }

    pub fn value<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        LogMessage::Value(Arc::new(value))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, LogMessage::Text(_))
    }

    /// Text form of the message; borrows for `Text`, renders `Value`
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            LogMessage::Text(text) => Cow::Borrowed(text),
            LogMessage::Value(value) => Cow::Owned(value.to_string()),
        }
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogMessage::Text(text) => f.write_str(text),
            LogMessage::Value(value) => fmt::Display::fmt(value.as_ref(), f),
        }
    }
}

impl fmt::Debug for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogMessage::Text(text) => f.debug_tuple("Text").field(text).finish(),
            LogMessage::Value(value) => f
                .debug_tuple("Value")
                .field(&format_args!("{}", value))
                .finish(),
        }
    }
}

impl From<String> for LogMessage {
    fn from(message: String) -> Self {
        LogMessage::Text(message)
    }
}

impl From<&str> for LogMessage {
    fn from(message: &str) -> Self {
        LogMessage::Text(message.to_string())
    }
}

impl From<Cow<'_, str>> for LogMessage {
    fn from(message: Cow<'_, str>) -> Self {
        LogMessage::Text(message.into_owned())
    }
}

/// Structured payloads stay structured until a writer renders them
impl From<serde_json::Value> for LogMessage {
    fn from(value: serde_json::Value) -> Self {
        LogMessage::value(value)
    }
}
