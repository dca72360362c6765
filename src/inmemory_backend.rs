// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Backend
//!
//! A backend that keeps records in memory instead of emitting them anywhere. It is meant for:
//!
//! - Unit testing code that logs through a [Registry](crate::Registry)
//! - Checking exactly what a handle forwarded, and how often the backend was consulted
//! - Capturing logs where no real sink is available
//!
//! ## Architecture
//!
//! Every writer handed out by the backend shares one recorder. The recorder holds an enablement
//! threshold that can be changed at any time, so tests can observe how handles react to a
//! backend being reconfigured after they were created.
//!
//! Writers count every `write` call, including those they then drop for being below the
//! threshold. Records that pass are stored as [LogRecord]s.

use crate::Level;
use crate::backend::{Backend, BackendError, Message, Writer, render_error_chain};
use crate::log_record::LogRecord;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
struct Recorder {
    threshold: RwLock<Level>,
    records: Mutex<Vec<LogRecord>>,
    writes: AtomicUsize,
}

impl Recorder {
    fn is_enabled(&self, level: Level) -> bool {
        level != Level::Off && level >= *self.threshold.read()
    }
}

/// A backend that records into memory.
///
/// # Example
///
/// ```rust
/// use levelgate::{InMemoryBackend, Level, LevelMap, Registry};
/// use std::sync::Arc;
///
/// let backend = Arc::new(InMemoryBackend::with_threshold(Level::Warn));
/// let registry = Registry::new(backend.clone(), LevelMap::identity());
///
/// registry.get("svc", Level::Error).log("kept");
/// registry.get("svc", Level::Info).log("below threshold");
///
/// assert_eq!(backend.write_count(), 2);
/// assert_eq!(backend.drain_logs(), "kept");
/// ```
#[derive(Debug)]
pub struct InMemoryBackend {
    recorder: Arc<Recorder>,
    lookups: Mutex<HashMap<String, usize>>,
    refused: Mutex<HashSet<String>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: Derived for diagnostics
// - Default: Implemented, everything enabled
// - Clone: NOT implemented - writers already handed out would keep recording into the original
// - PartialEq/Eq/Hash: NOT implemented - equality of recorders is not meaningful

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// A backend with every level except [Level::Off] enabled.
    pub fn new() -> Self {
        Self::with_threshold(Level::Trace)
    }

    /// A backend that enables `threshold` and everything more severe.
    pub fn with_threshold(threshold: Level) -> Self {
        Self {
            recorder: Arc::new(Recorder {
                threshold: RwLock::new(threshold),
                records: Mutex::new(Vec::new()),
                writes: AtomicUsize::new(0),
            }),
            lookups: Mutex::new(HashMap::new()),
            refused: Mutex::new(HashSet::new()),
        }
    }

    /// Changes the threshold for every writer, including those already handed out.
    pub fn set_threshold(&self, threshold: Level) {
        *self.recorder.threshold.write() = threshold;
    }

    /// Makes later writer lookups for `name` fail.
    pub fn refuse(&self, name: &str) {
        self.refused.lock().insert(name.to_string());
    }

    /// How many writers have been looked up for `name`.
    pub fn lookup_count(&self, name: &str) -> usize {
        self.lookups.lock().get(name).copied().unwrap_or(0)
    }

    /// How many times any writer was asked to write, whether or not the record was kept.
    pub fn write_count(&self) -> usize {
        self.recorder.writes.load(Ordering::Relaxed)
    }

    /// Takes every kept record, oldest first.
    pub fn drain_records(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.recorder.records.lock())
    }

    /// Takes every kept record, rendered and joined by newlines.
    ///
    /// ```rust
    /// use levelgate::{InMemoryBackend, LevelMap, Registry};
    /// use std::sync::Arc;
    ///
    /// let backend = Arc::new(InMemoryBackend::new());
    /// let registry = Registry::new(backend.clone(), LevelMap::identity());
    /// let logger = registry.get_default("svc");
    /// logger.log("First message");
    /// logger.at_warn().log("Second message");
    ///
    /// assert_eq!(backend.drain_logs(), "First message\nSecond message");
    /// assert_eq!(backend.drain_logs(), "");
    /// ```
    pub fn drain_logs(&self) -> String {
        self.drain_records()
            .iter()
            .map(LogRecord::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Backend<Level> for InMemoryBackend {
    fn lookup_writer(&self, name: &str) -> Result<Arc<dyn Writer<Level>>, BackendError> {
        if self.refused.lock().contains(name) {
            return Err(BackendError::new(name, "refused by InMemoryBackend"));
        }
        *self.lookups.lock().entry(name.to_string()).or_insert(0) += 1;
        Ok(Arc::new(InMemoryWriter {
            name: name.to_string(),
            recorder: self.recorder.clone(),
        }))
    }
}

#[derive(Debug)]
struct InMemoryWriter {
    name: String,
    recorder: Arc<Recorder>,
}

impl Writer<Level> for InMemoryWriter {
    fn is_level_enabled(&self, level: Level) -> bool {
        self.recorder.is_enabled(level)
    }

    fn write(&self, level: Level, message: Message<'_>, error: Option<&(dyn Error + 'static)>) {
        self.recorder.writes.fetch_add(1, Ordering::Relaxed);
        if !self.recorder.is_enabled(level) {
            return;
        }
        let mut record = LogRecord::new(level, self.name.as_str(), message.render());
        if let Some(error) = error {
            record = record.with_error(render_error_chain(error));
        }
        self.recorder.records.lock().push(record);
    }
}
