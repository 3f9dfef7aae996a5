//! Error types for the logger facade
//!
//! Logging calls themselves never fail: a level-gate miss or a filter
//! rejection is a silent drop. These errors cover the operations around
//! logging (flushing writers, waiting on the serial worker, parsing levels,
//! building a logger from configuration).

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A writer reported a failure while flushing
    #[error("Writer '{writer}' failed: {message}")]
    WriterError { writer: String, message: String },

    /// The serial worker thread could not be started
    #[error("Failed to spawn serial worker '{name}': {source}")]
    WorkerSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The serial worker is no longer accepting work
    #[error("Serial worker stopped")]
    WorkerStopped,

    /// Work submitted to the execution method panicked
    #[error("Logger work panicked: {0}")]
    WorkPanicked(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer error
    pub fn writer(writer: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::WriterError {
            writer: writer.into(),
            message: message.into(),
        }
    }

    /// Turn a caught panic payload into an error carrying its message
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        LoggerError::WorkPanicked(panic_message(payload.as_ref()))
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
