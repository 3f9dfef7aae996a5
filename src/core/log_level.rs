//! Log level definitions and the level set used by the gate

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Event = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Every level, lowest severity first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Event,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Event => "EVENT",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// The single bit this level occupies in a [`LogLevels`] set
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Event => Cyan,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "EVENT" => Ok(LogLevel::Event),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// A set of enabled severities, one bit per [`LogLevel`].
///
/// The set is a plain value. A logger's current levels are replaced as a
/// whole, never edited bit by bit.
///
/// # Example
///
/// ```
/// use rust_logger_facade::{LogLevel, LogLevels};
///
/// let levels = LogLevels::from(LogLevel::Warn) | LogLevel::Error;
/// assert!(levels.contains(LogLevel::Error));
/// assert!(!levels.contains(LogLevel::Debug));
/// assert!(!LogLevels::OFF.contains(LogLevel::Error));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<LogLevel>", into = "Vec<LogLevel>")]
pub struct LogLevels(u8);

impl LogLevels {
    /// No level enabled
    pub const OFF: LogLevels = LogLevels(0);

    /// Every level enabled
    pub const ALL: LogLevels = LogLevels(
        LogLevel::Debug.bit()
            | LogLevel::Info.bit()
            | LogLevel::Event.bit()
            | LogLevel::Warn.bit()
            | LogLevel::Error.bit(),
    );

    pub const DEBUG: LogLevels = LogLevels(LogLevel::Debug.bit());
    pub const INFO: LogLevels = LogLevels(LogLevel::Info.bit());
    pub const EVENT: LogLevels = LogLevels(LogLevel::Event.bit());
    pub const WARN: LogLevels = LogLevels(LogLevel::Warn.bit());
    pub const ERROR: LogLevels = LogLevels(LogLevel::Error.bit());

    /// Rebuild a set from its raw bits; bits outside [`LogLevels::ALL`] are discarded
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        LogLevels(bits & Self::ALL.0)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `level` and every more severe level
    pub fn at_least(level: LogLevel) -> Self {
        LogLevel::ALL
            .iter()
            .copied()
            .filter(|candidate| *candidate >= level)
            .collect()
    }

    #[inline]
    pub const fn contains(self, level: LogLevel) -> bool {
        self.0 & level.bit() != 0
    }

    #[inline]
    pub const fn union(self, other: LogLevels) -> Self {
        LogLevels(self.0 | other.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Enabled levels, lowest severity first
    pub fn iter(self) -> impl Iterator<Item = LogLevel> {
        LogLevel::ALL.into_iter().filter(move |level| self.contains(*level))
    }
}

impl From<LogLevel> for LogLevels {
    fn from(level: LogLevel) -> Self {
        LogLevels(level.bit())
    }
}

impl From<Vec<LogLevel>> for LogLevels {
    fn from(levels: Vec<LogLevel>) -> Self {
        levels.into_iter().collect()
    }
}

impl From<LogLevels> for Vec<LogLevel> {
    fn from(levels: LogLevels) -> Self {
        levels.iter().collect()
    }
}

impl FromIterator<LogLevel> for LogLevels {
    fn from_iter<I: IntoIterator<Item = LogLevel>>(iter: I) -> Self {
        iter.into_iter()
            .fold(LogLevels::OFF, |set, level| set | level)
    }
}

impl BitOr for LogLevels {
    type Output = LogLevels;

    fn bitor(self, rhs: LogLevels) -> LogLevels {
        self.union(rhs)
    }
}

impl BitOr<LogLevel> for LogLevels {
    type Output = LogLevels;

    fn bitor(self, rhs: LogLevel) -> LogLevels {
        self.union(rhs.into())
    }
}

impl BitOrAssign for LogLevels {
    fn bitor_assign(&mut self, rhs: LogLevels) {
        *self = self.union(rhs);
    }
}

impl BitOrAssign<LogLevel> for LogLevels {
    fn bitor_assign(&mut self, rhs: LogLevel) {
        *self = self.union(rhs.into());
    }
}

impl fmt::Debug for LogLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for LogLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "OFF");
        }
        if *self == LogLevels::ALL {
            return write!(f, "ALL");
        }
        let names: Vec<&str> = self.iter().map(|level| level.to_str()).collect();
        write!(f, "{}", names.join("|"))
    }
}

impl FromStr for LogLevels {
    type Err = LoggerError;

    /// Accepts `off`, `all`, or level names separated by `,` or `|`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("off") || trimmed.is_empty() {
            return Ok(LogLevels::OFF);
        }
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(LogLevels::ALL);
        }
        trimmed
            .split([',', '|'])
            .filter(|part| !part.trim().is_empty())
            .map(str::parse::<LogLevel>)
            .collect::<Result<LogLevels, _>>()
    }
}
