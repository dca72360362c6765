// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend adapter over the [`log`] facade.
//!
//! Logger names become record targets and levels translate to [`log::LevelFilter`], so whatever
//! `log::Log` implementation the program installs decides what is emitted and where. This is the
//! backend behind the process-wide [global registry](crate::global::global_registry).
//!
//! | Level   | `log` level          |
//! |---------|----------------------|
//! | `Trace` | `LevelFilter::Trace` |
//! | `Debug` | `LevelFilter::Debug` |
//! | `Info`  | `LevelFilter::Info`  |
//! | `Warn`  | `LevelFilter::Warn`  |
//! | `Error` | `LevelFilter::Error` |
//! | `Off`   | `LevelFilter::Off`   |

use crate::backend::{Backend, BackendError, Message, Writer, render_error_chain};
use crate::level_map::LevelMap;
use log::{LevelFilter, Metadata, Record};
use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogBackend;

impl LogBackend {
    pub const fn new() -> Self {
        Self
    }

    /// The translation this backend expects, in [Level](crate::Level) order.
    pub fn level_map() -> LevelMap<LevelFilter> {
        LevelMap::new([
            LevelFilter::Trace,
            LevelFilter::Debug,
            LevelFilter::Info,
            LevelFilter::Warn,
            LevelFilter::Error,
            LevelFilter::Off,
        ])
    }
}

impl Backend<LevelFilter> for LogBackend {
    fn lookup_writer(&self, name: &str) -> Result<Arc<dyn Writer<LevelFilter>>, BackendError> {
        Ok(Arc::new(LogWriter {
            target: name.to_string(),
        }))
    }
}

#[derive(Debug)]
struct LogWriter {
    target: String,
}

impl LogWriter {
    fn enabled(&self, level: log::Level) -> bool {
        level <= log::max_level()
            && log::logger().enabled(
                &Metadata::builder()
                    .level(level)
                    .target(&self.target)
                    .build(),
            )
    }
}

/// Message followed by the error chain, rendered lazily by the `log` implementation.
struct WithError<'a> {
    message: Message<'a>,
    error: Option<&'a (dyn Error + 'static)>,
}

impl Display for WithError<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.error {
            None => Display::fmt(&self.message, f),
            Some(error) => {
                let message = self.message.render();
                if message.is_empty() {
                    f.write_str(&render_error_chain(error))
                } else {
                    write!(f, "{}: {}", message, render_error_chain(error))
                }
            }
        }
    }
}

impl Writer<LevelFilter> for LogWriter {
    fn is_level_enabled(&self, level: LevelFilter) -> bool {
        match level.to_level() {
            Some(level) => self.enabled(level),
            None => false,
        }
    }

    fn write(
        &self,
        level: LevelFilter,
        message: Message<'_>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let Some(level) = level.to_level() else {
            return;
        };
        if !self.enabled(level) {
            return;
        }
        let rendered = WithError { message, error };
        log::logger().log(
            &Record::builder()
                .args(format_args!("{rendered}"))
                .level(level)
                .target(&self.target)
                .build(),
        );
    }
}
