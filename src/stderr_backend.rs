// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::Level;
use crate::backend::{Backend, BackendError, Message, Writer, render_error_chain};
use std::error::Error;
use std::sync::Arc;

/// Environment variable read by [StdErrBackend::from_env].
pub const LEVEL_ENV: &str = "LEVELGATE_LEVEL";

/**
A reference backend that writes to stderr.

Each record is one line, `LEVEL name - message`, followed by `: error` when an error was logged.
Records below the threshold are dropped.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StdErrBackend {
    threshold: Level,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug/Clone/Copy: Derived - a single Level field
// - PartialEq/Eq/Hash: Derived - two backends with the same threshold behave identically
// - Default: Implemented - threshold Level::DEFAULT
// - Send/Sync: Automatically implemented

impl Default for StdErrBackend {
    fn default() -> Self {
        Self::new(Level::DEFAULT)
    }
}

impl StdErrBackend {
    pub const fn new(threshold: Level) -> Self {
        Self { threshold }
    }

    /// Reads the threshold from [LEVEL_ENV], falling back to [Level::DEFAULT] when the variable
    /// is unset or does not name a level.
    pub fn from_env() -> Self {
        Self::new(threshold_from(std::env::var(LEVEL_ENV).ok().as_deref()))
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }
}

fn threshold_from(value: Option<&str>) -> Level {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or(Level::DEFAULT)
}

fn format_line(
    level: Level,
    name: &str,
    message: Message<'_>,
    error: Option<&(dyn Error + 'static)>,
) -> String {
    let mut line = format!("{level} {name} - {message}");
    if let Some(error) = error {
        line.push_str(": ");
        line.push_str(&render_error_chain(error));
    }
    line
}

impl Backend<Level> for StdErrBackend {
    fn lookup_writer(&self, name: &str) -> Result<Arc<dyn Writer<Level>>, BackendError> {
        Ok(Arc::new(StdErrWriter {
            name: name.to_string(),
            threshold: self.threshold,
        }))
    }
}

#[derive(Debug)]
struct StdErrWriter {
    name: String,
    threshold: Level,
}

impl Writer<Level> for StdErrWriter {
    fn is_level_enabled(&self, level: Level) -> bool {
        level != Level::Off && level >= self.threshold
    }

    fn write(&self, level: Level, message: Message<'_>, error: Option<&(dyn Error + 'static)>) {
        if !self.is_level_enabled(level) {
            return;
        }
        use std::io::Write;
        let line = format_line(level, &self.name, message, error);
        let mut lock = std::io::stderr().lock();
        //a logging call has nowhere to report its own failure
        let _ = writeln!(lock, "{line}");
    }
}
