//! Serializable logger configuration
//!
//! Describes the parts of a logger that can live in a config file: the
//! enabled levels and the execution discipline. Writers and filters are
//! code, so they are attached through [`LoggerBuilder`](crate::LoggerBuilder).

use super::{error::Result, log_level::LogLevels};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Synchronous,
    Asynchronous,
}

/// # Example
///
/// ```
/// use rust_logger_facade::{ExecutionMode, LogLevels, LoggerConfig};
///
/// let config = LoggerConfig::from_json(
///     r#"{ "levels": ["warn", "error"], "execution": "asynchronous" }"#,
/// ).unwrap();
///
/// assert_eq!(config.levels, LogLevels::WARN | LogLevels::ERROR);
/// assert_eq!(config.execution, ExecutionMode::Asynchronous);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub levels: LogLevels,
    pub execution: ExecutionMode,
    /// Thread name for the serial worker; ignored for synchronous execution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_name: Option<String>,
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            levels: LogLevels::ALL,
            execution: ExecutionMode::Synchronous,
            worker_name: None,
        }
    }
}
