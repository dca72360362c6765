// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable, level-scoped logger handles.
//!
//! A [Logger] is bound to one name and one [Level] for its whole life. Changing level means
//! asking for another handle ([Logger::at_level]), which goes back through the registry that
//! created this one, so the result is interned like any other lookup.
//!
//! # Eager and lazy calls
//!
//! Calls taking plain values ([Logger::log], [Logger::log_err_msg], and [Logger::log_args] with
//! only [Arg::Value]s) are forwarded straight to the writer, which applies its own enablement
//! check. Calls involving a [Supplier] first ask the writer whether the level is enabled, and
//! only then run the suppliers, each exactly once and in argument order. A disabled level
//! therefore costs one enablement query, whatever the arguments would have cost to compute.
//!
//! A handle at [Level::Off] never reaches its writer.
//!
//! # Examples
//!
//! ```
//! use levelgate::{Arg, InMemoryBackend, Level, LevelMap, Logger, Registry};
//! use std::sync::Arc;
//!
//! let backend = Arc::new(InMemoryBackend::with_threshold(Level::Info));
//! let registry = Registry::new(backend.clone(), LevelMap::identity());
//! let logger = registry.get_default("orders");
//!
//! logger.log("plain message");
//!
//! let debug = logger.at_debug();
//! assert!(!debug.is_enabled());
//! debug.log_lazy(|| -> String { unreachable!("suppressed levels never run suppliers") });
//!
//! let count = 3;
//! let total = || 10 * count;
//! logger.at_warn().log_args("{} orders, {} total", &[Arg::value(&count), Arg::lazy(&total)]);
//!
//! assert_eq!(backend.drain_logs(), "plain message\n3 orders, 30 total");
//! ```

use crate::Level;
use crate::arg::{Arg, Supplier, force_all};
use crate::backend::{Message, Writer};
use crate::registry::{BackendLevel, Registry, RegistryInner};
use std::error::Error;
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

struct LoggerInner<L> {
    name: String,
    level: Level,
    translated: L,
    writer: Arc<dyn Writer<L>>,
    registry: Weak<RegistryInner<L>>,
}

/// A handle scoped to one (name, level) pair.
///
/// Handles are cheap to clone and compare by identity: two handles are equal exactly when they
/// were handed out for the same registry entry.
pub struct Logger<L> {
    inner: Arc<LoggerInner<L>>,
}

/// What a call asked to log, before enablement is decided.
#[derive(Clone, Copy)]
enum Pending<'a> {
    Text(&'a dyn Display),
    Lazy(&'a dyn Supplier),
    Template(&'a str, &'a [Arg<'a>]),
}

impl Pending<'_> {
    fn is_deferred(&self) -> bool {
        match self {
            Pending::Text(_) => false,
            Pending::Lazy(_) => true,
            Pending::Template(_, args) => args.iter().any(Arg::is_deferred),
        }
    }
}

impl<L: BackendLevel> Logger<L> {
    pub(crate) fn new(name: String, level: Level, registry: &Arc<RegistryInner<L>>) -> Self {
        let writer = match registry.backend.lookup_writer(&name) {
            Ok(writer) => writer,
            Err(e) => panic!("{e}"),
        };
        Self {
            inner: Arc::new(LoggerInner {
                translated: registry.levels.translate(level),
                name,
                level,
                writer,
                registry: Arc::downgrade(registry),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn level(&self) -> Level {
        self.inner.level
    }

    /// Whether `a` and `b` are the same handle.
    pub fn same(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /**
    Returns the handle for this name at `level`.

    Returns this very handle when `level` is already its level; otherwise the registry's handle
    for the new pair.

    # Panics

    Panics if the registry that created this handle has been dropped, or if the backend cannot
    produce a writer for the new pair.
    */
    pub fn at_level(&self, level: Level) -> Self {
        if level == self.inner.level {
            return self.clone();
        }
        self.registry().get(&self.inner.name, level)
    }

    pub fn at_trace(&self) -> Self {
        self.at_level(Level::Trace)
    }

    pub fn at_debug(&self) -> Self {
        self.at_level(Level::Debug)
    }

    pub fn at_info(&self) -> Self {
        self.at_level(Level::Info)
    }

    pub fn at_warn(&self) -> Self {
        self.at_level(Level::Warn)
    }

    pub fn at_error(&self) -> Self {
        self.at_level(Level::Error)
    }

    /// Whether records at this handle's level will be emitted.
    ///
    /// Asks the writer on every call, so a backend reconfigured after this handle was created
    /// is honored.
    pub fn is_enabled(&self) -> bool {
        self.inner.level != Level::Off
            && self.inner.writer.is_level_enabled(self.inner.translated)
    }

    /// Logs a value. The writer decides whether to emit it.
    pub fn log(&self, message: impl Display) {
        self.dispatch(Pending::Text(&message), None);
    }

    /// Logs the result of `message`, running it only if this level is enabled.
    pub fn log_lazy(&self, message: impl Supplier) {
        self.dispatch(Pending::Lazy(&message), None);
    }

    /**
    Logs a `{}` template with positional arguments.

    If any argument is [Arg::Deferred], enablement is checked before any of them is run.
    */
    pub fn log_args(&self, template: &str, args: &[Arg<'_>]) {
        self.dispatch(Pending::Template(template, args), None);
    }

    /// Logs an error with an empty message.
    pub fn log_err(&self, error: &(dyn Error + 'static)) {
        self.dispatch(Pending::Text(&""), Some(error));
    }

    pub fn log_err_msg(&self, error: &(dyn Error + 'static), message: impl Display) {
        self.dispatch(Pending::Text(&message), Some(error));
    }

    pub fn log_err_lazy(&self, error: &(dyn Error + 'static), message: impl Supplier) {
        self.dispatch(Pending::Lazy(&message), Some(error));
    }

    pub fn log_err_args(&self, error: &(dyn Error + 'static), template: &str, args: &[Arg<'_>]) {
        self.dispatch(Pending::Template(template, args), Some(error));
    }

    fn dispatch(&self, pending: Pending<'_>, error: Option<&(dyn Error + 'static)>) {
        if self.inner.level == Level::Off {
            return;
        }
        if pending.is_deferred() && !self.is_enabled() {
            return;
        }
        let level = self.inner.translated;
        let writer = &self.inner.writer;
        match pending {
            Pending::Text(text) => writer.write(level, Message::Text(text), error),
            Pending::Lazy(supplier) => {
                let text = supplier.supply();
                writer.write(level, Message::Text(&text), error);
            }
            Pending::Template(template, args) => {
                let forced = force_all(args);
                writer.write(
                    level,
                    Message::Template {
                        template,
                        args: &forced,
                    },
                    error,
                );
            }
        }
    }

    fn registry(&self) -> Registry<L> {
        match self.inner.registry.upgrade() {
            Some(inner) => Registry { inner },
            None => panic!(
                "logger `{}` outlived the registry that created it",
                self.inner.name
            ),
        }
    }
}

impl<L> Clone for Logger<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<L> PartialEq for Logger<L> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<L> Eq for Logger<L> {}

impl<L> Hash for Logger<L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl<L> Debug for Logger<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("level", &self.inner.level)
            .finish()
    }
}

/*
Boilerplate notes.

Clone shares the handle; it does not create a new registry entry.
PartialEq/Eq/Hash are provenance-based (Arc pointer), matching the interning contract: equal
handles are the same entry. Data equality would be misleading across registries.
Ord makes no sense.
Default makes no sense without a registry.
Send/Sync follow from the writer bound and are required; handles are shared across threads.
*/
