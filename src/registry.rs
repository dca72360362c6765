// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interning cache for logger handles.
//!
//! A [Registry] maps each (name, level) pair to exactly one [Logger]. The first request for a
//! pair constructs the handle, binding the backend writer for that name; every later request,
//! from any thread, receives the same handle. Entries are never evicted or replaced.
//!
//! # Concurrency
//!
//! Lookups of existing handles take a shared read lock. A miss takes the write lock, re-checks,
//! and constructs while holding it, so concurrent first requests for the same pair observe a
//! single construction (and a single writer lookup) and all receive the same handle.
//!
//! # Examples
//!
//! ```
//! use levelgate::{InMemoryBackend, Level, LevelMap, Logger, Registry};
//! use std::sync::Arc;
//!
//! let backend = Arc::new(InMemoryBackend::new());
//! let registry = Registry::new(backend.clone(), LevelMap::identity());
//!
//! let a = registry.get("svc", Level::Debug);
//! let b = registry.get("svc", Level::Debug);
//! assert!(Logger::same(&a, &b));
//! assert_eq!(backend.lookup_count("svc"), 1);
//! ```

use crate::Level;
use crate::backend::Backend;
use crate::level_map::LevelMap;
use crate::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Bounds every backend level type satisfies.
pub trait BackendLevel: Copy + PartialEq + Debug + Send + Sync + 'static {}
impl<T: Copy + PartialEq + Debug + Send + Sync + 'static> BackendLevel for T {}

/// One slot per [Level]; together with the name this forms the (name, level) key.
type LevelSlots<L> = [Option<Logger<L>>; 6];

pub(crate) struct RegistryInner<L> {
    pub(crate) backend: Arc<dyn Backend<L>>,
    pub(crate) levels: LevelMap<L>,
    loggers: RwLock<HashMap<String, LevelSlots<L>>>,
}

/// A shared handle to an interning cache.
///
/// Cloning is cheap; clones refer to the same cache.
pub struct Registry<L> {
    pub(crate) inner: Arc<RegistryInner<L>>,
}

impl<L: BackendLevel> Registry<L> {
    /// Creates an empty registry over `backend`, translating levels through `levels`.
    pub fn new(backend: Arc<dyn Backend<L>>, levels: LevelMap<L>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                backend,
                levels,
                loggers: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Returns the handle for `(name, level)`, creating it on first request.
    ///
    /// The name is used verbatim.
    ///
    /// # Panics
    ///
    /// Panics if the backend cannot produce a writer for `name`.
    pub fn get(&self, name: &str, level: Level) -> Logger<L> {
        if let Some(existing) = self.find(name, level) {
            return existing;
        }

        let logger = {
            let mut loggers = self.inner.loggers.write();
            if let Some(existing) = loggers
                .get(name)
                .and_then(|slots| slots[level.index()].as_ref())
            {
                return existing.clone();
            }
            // bind the writer before touching the map, so a failed lookup leaves no entry behind
            let logger = Logger::new(name.to_string(), level, &self.inner);
            loggers.entry(name.to_string()).or_default()[level.index()] = Some(logger.clone());
            logger
        };
        log::trace!(target: "levelgate::registry", "interned logger `{name}` at {level}");
        logger
    }

    /// Returns the handle for `name` at [Level::DEFAULT].
    pub fn get_default(&self, name: &str) -> Logger<L> {
        self.get(name, Level::DEFAULT)
    }

    /// Whether a handle for `(name, level)` has been created.
    pub fn contains(&self, name: &str, level: Level) -> bool {
        self.find(name, level).is_some()
    }

    /// Number of handles created so far.
    pub fn len(&self) -> usize {
        self.inner
            .loggers
            .read()
            .values()
            .map(|slots| slots.iter().flatten().count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find(&self, name: &str, level: Level) -> Option<Logger<L>> {
        self.inner
            .loggers
            .read()
            .get(name)
            .and_then(|slots| slots[level.index()].clone())
    }
}

impl<L> Clone for Registry<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<L: BackendLevel> Debug for Registry<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("levels", &self.inner.levels)
            .field("loggers", &self.len())
            .finish()
    }
}

/*
Boilerplate notes.

Clone is a shared-handle clone, like Arc.
PartialEq/Hash are not implemented: it is unclear whether two registries with the same
contents should compare equal, and nothing needs it.
Default makes no sense without a backend.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_backend::InMemoryBackend;
    use std::sync::Barrier;
    use std::thread;

    fn registry() -> (Arc<InMemoryBackend>, Registry<Level>) {
        let backend = Arc::new(InMemoryBackend::new());
        let registry = Registry::new(backend.clone(), LevelMap::identity());
        (backend, registry)
    }

    #[test]
    fn starts_empty() {
        let (_, registry) = registry();
        assert!(registry.is_empty());
        assert!(!registry.contains("svc", Level::Info));
    }

    #[test]
    fn same_key_same_handle() {
        let (backend, registry) = registry();
        let a = registry.get("svc", Level::Warn);
        let b = registry.get("svc", Level::Warn);
        assert!(Logger::same(&a, &b));
        assert_eq!(registry.len(), 1);
        assert_eq!(backend.lookup_count("svc"), 1);
    }

    #[test]
    fn levels_are_distinct_keys() {
        let (backend, registry) = registry();
        let info = registry.get("svc", Level::Info);
        let warn = registry.get("svc", Level::Warn);
        assert!(!Logger::same(&info, &warn));
        assert_eq!(registry.len(), 2);
        // one writer per handle
        assert_eq!(backend.lookup_count("svc"), 2);
    }

    #[test]
    fn default_level_is_info() {
        let (_, registry) = registry();
        let logger = registry.get_default("svc");
        assert_eq!(logger.level(), Level::Info);
        assert!(Logger::same(&logger, &registry.get("svc", Level::Info)));
    }

    #[test]
    fn names_are_verbatim() {
        let (_, registry) = registry();
        assert_eq!(registry.get("", Level::Info).name(), "");
        assert_eq!(registry.get("   ", Level::Info).name(), "   ");
        assert!(!Logger::same(
            &registry.get("", Level::Info),
            &registry.get("   ", Level::Info)
        ));
    }

    #[test]
    fn concurrent_first_requests_construct_once() {
        const THREADS: usize = 8;
        let (backend, registry) = registry();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = registry.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    registry.get("svc", Level::Info)
                })
            })
            .collect();
        let loggers: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();

        assert_eq!(backend.lookup_count("svc"), 1);
        for logger in &loggers {
            assert!(Logger::same(logger, &loggers[0]));
        }
    }

    #[test]
    fn failed_lookup_leaves_no_entry() {
        let (backend, registry) = registry();
        backend.refuse("broken");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.get("broken", Level::Info)
        }));
        assert!(result.is_err());
        assert!(!registry.inner.loggers.read().contains_key("broken"));
        assert!(registry.is_empty());

        // the registry keeps working for other names
        let ok = registry.get("svc", Level::Info);
        assert!(Logger::same(&ok, &registry.get("svc", Level::Info)));
    }

    #[test]
    #[should_panic(expected = "no writer available")]
    fn lookup_failure_is_fatal() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.refuse("broken");
        let registry = Registry::new(backend, LevelMap::identity());
        registry.get("broken", Level::Info);
    }
}
