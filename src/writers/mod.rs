//! Reference writer implementations

#[cfg(feature = "console")]
pub mod console;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleWriter;
pub use memory::{MemoryRecord, MemoryWriter};

pub use crate::core::LogWriter;
