// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owned snapshot of an emitted record.
//!
//! Writers receive borrowed [Message](crate::Message)s that only live for the duration of the
//! call. Backends that keep records around, like [InMemoryBackend](crate::InMemoryBackend),
//! render them into a [LogRecord] first.
//!
//! ```rust
//! use levelgate::{Level, LogRecord};
//!
//! let record = LogRecord::new(Level::Warn, "svc", "disk almost full");
//! assert_eq!(record.to_string(), "disk almost full");
//!
//! let record = record.with_error("quota exceeded");
//! assert_eq!(record.to_string(), "disk almost full: quota exceeded");
//! ```

use crate::Level;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    pub level: Level,
    pub name: String,
    /// The rendered message; empty when only an error was logged.
    pub message: String,
    /// The rendered error chain, if any.
    pub error: Option<String>,
}

impl LogRecord {
    pub fn new(level: Level, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error {
            None => f.write_str(&self.message),
            Some(error) if self.message.is_empty() => f.write_str(error),
            Some(error) => write!(f, "{}: {}", self.message, error),
        }
    }
}

/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug/Clone: Derived
- PartialEq/Eq/Hash: Derived - records are plain data, so data equality is the right notion
- Display: the message, followed by the error when present

NOT IMPLEMENTED:
- Default: a record without a name or level is not meaningful
- Ord/PartialOrd: No meaningful ordering for log records
*/
