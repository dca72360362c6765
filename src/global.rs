// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide registry and the `instance` entry points.
//!
//! Most programs never build a [Registry] themselves. They ask for a handle with
//! [`instance!`](crate::instance) and get one from a registry that lives for the whole process
//! and routes records through the [`log`] facade via [LogBackend]. Which `log::Log`
//! implementation ends up emitting them is up to the program.
//!
//! # Name resolution
//!
//! - `instance!()` names the handle after the calling module (`module_path!()` at the call
//!   site).
//! - `instance!(name)` uses `name` verbatim when it is a string (`&str`, `String`, `&String`) or
//!   `Some` string, including empty and whitespace-only strings. `None` falls back to the calling
//!   module. See [LoggerName].
//! - `instance!(type T)` names the handle after the type `T`.
//!
//! All three hand out the handle at [Level::DEFAULT](crate::Level::DEFAULT).
//!
//! # Examples
//!
//! ```
//! use levelgate::{Level, Logger};
//!
//! let logger = levelgate::instance!();
//! assert_eq!(logger.level(), Level::Info);
//! assert!(Logger::same(&logger, &levelgate::instance!(None::<&str>)));
//!
//! let named = levelgate::instance!("payments");
//! assert_eq!(named.name(), "payments");
//! named.at_warn().log("retrying");
//! ```
//!
//! # Thread Safety
//!
//! The registry is created on first use through a `OnceLock`; after that every access goes
//! through the registry's own locking.

use crate::log_backend::LogBackend;
use crate::logger::Logger;
use crate::registry::Registry;
use log::LevelFilter;
use std::sync::{Arc, OnceLock};

/// Handle type handed out by the process-wide registry.
pub type GlobalLogger = Logger<LevelFilter>;

static GLOBAL_REGISTRY: OnceLock<Registry<LevelFilter>> = OnceLock::new();

/// The process-wide registry, created on first use.
pub fn global_registry() -> &'static Registry<LevelFilter> {
    GLOBAL_REGISTRY
        .get_or_init(|| Registry::new(Arc::new(LogBackend::new()), LogBackend::level_map()))
}

/**
Anything [`instance!`](crate::instance) accepts as a name.

Implemented for `str`, `String`, references to either, and `Option`s of them. `None` means
"no name given" and falls back to the calling module.
*/
pub trait LoggerName {
    fn logger_name(&self) -> Option<&str>;
}

impl LoggerName for str {
    fn logger_name(&self) -> Option<&str> {
        Some(self)
    }
}

impl LoggerName for String {
    fn logger_name(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: LoggerName + ?Sized> LoggerName for &T {
    fn logger_name(&self) -> Option<&str> {
        (**self).logger_name()
    }
}

impl<T: LoggerName> LoggerName for Option<T> {
    fn logger_name(&self) -> Option<&str> {
        self.as_ref().and_then(|name| name.logger_name())
    }
}

/**
Returns the process-wide handle for `name`, or for `caller` when `name` is `None`.

Prefer [`instance!`](crate::instance), which fills in `caller` for you.
*/
pub fn instance(name: Option<&str>, caller: &str) -> GlobalLogger {
    global_registry().get_default(name.unwrap_or(caller))
}

/// Returns the process-wide handle named after the type `T`.
pub fn instance_for<T: ?Sized>() -> GlobalLogger {
    global_registry().get_default(std::any::type_name::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn none_falls_back_to_caller() {
        let logger = instance(None, "some::module");
        assert_eq!(logger.name(), "some::module");
        assert!(Logger::same(&logger, &instance(Some("some::module"), "other")));
    }

    #[test]
    fn string_like_names() {
        let owned = String::from("svc.dynamic");
        assert_eq!(owned.logger_name(), Some("svc.dynamic"));
        assert_eq!((&owned).logger_name(), Some("svc.dynamic"));
        assert_eq!(Some(&owned).logger_name(), Some("svc.dynamic"));
        assert_eq!(Some(owned.clone()).logger_name(), Some("svc.dynamic"));
        assert_eq!(None::<String>.logger_name(), None);
        assert_eq!("".logger_name(), Some(""));
    }

    #[test]
    fn type_names() {
        struct Marker;
        let logger = instance_for::<Marker>();
        assert!(logger.name().ends_with("Marker"));
        assert_eq!(logger.level(), Level::DEFAULT);
    }

    #[test]
    fn handles_are_interned_globally() {
        let a = instance(Some("levelgate::global::tests"), "");
        let b = global_registry().get("levelgate::global::tests", Level::Info);
        assert!(Logger::same(&a, &b));
        assert!(global_registry().contains("levelgate::global::tests", Level::Info));
    }
}
