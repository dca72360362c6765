// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability boundary between logger handles and whatever actually emits records.
//!
//! A [Backend] hands out one [Writer] per logger name. Handles bind their writer once, at
//! construction, and from then on only ever ask it two things: is this (translated) level
//! enabled, and please write this record.
//!
//! `L` is the backend's own level type. Handles translate through the registry's
//! [LevelMap](crate::LevelMap) before talking to the writer.

use crate::arg::Forced;
use std::error::Error;
use std::fmt::{Debug, Display};
use std::sync::Arc;

pub trait Backend<L>: Send + Sync {
    /**
    Resolves the writer for a logger name.

    Called at most once per (name, level) pair by a [Registry](crate::Registry). An `Err` here
    is treated as a configuration bug and aborts the calling thread.
    */
    fn lookup_writer(&self, name: &str) -> Result<Arc<dyn Writer<L>>, BackendError>;
}

pub trait Writer<L>: Debug + Send + Sync {
    /// Whether a record at `level` would be emitted.
    fn is_level_enabled(&self, level: L) -> bool;

    /**
    Emits a record.

    Handles forward plain-value calls without consulting [Self::is_level_enabled] first, so
    writers are expected to apply their own enablement check here.

    Failures are the writer's business. Handles neither catch nor wrap them.
    */
    fn write(&self, level: L, message: Message<'_>, error: Option<&(dyn Error + 'static)>);
}

/// Returned by [Backend::lookup_writer] when no writer can be produced for a name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no writer available for logger `{name}`: {reason}")]
pub struct BackendError {
    pub name: String,
    pub reason: String,
}

impl BackendError {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// The message part of a record.
#[derive(Clone, Copy)]
pub enum Message<'a> {
    /// A single value, logged as-is.
    Text(&'a dyn Display),
    /// A template with `{}` placeholders and its positional arguments, already forced.
    Template {
        template: &'a str,
        args: &'a [Forced<'a>],
    },
}

impl Message<'_> {
    /// Renders the message into a flat string.
    ///
    /// Each `{}` in a template is replaced by the next argument. Placeholders without a matching
    /// argument are left as written; surplus arguments are dropped.
    pub fn render(&self) -> String {
        match self {
            Message::Text(text) => text.to_string(),
            Message::Template { template, args } => render_template(template, args),
        }
    }
}

impl Display for Message<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::Text(text) => Display::fmt(text, f),
            Message::Template { .. } => f.write_str(&self.render()),
        }
    }
}

impl Debug for Message<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::Text(text) => f.debug_tuple("Text").field(&text.to_string()).finish(),
            Message::Template { template, args } => f
                .debug_struct("Template")
                .field("template", template)
                .field("args", args)
                .finish(),
        }
    }
}

fn render_template(template: &str, args: &[Forced<'_>]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => {
                //writing into a String cannot fail
                let _ = write!(out, "{arg}");
            }
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

/// Renders an error followed by its `source()` chain, separated by `: `.
pub fn render_error_chain(error: &(dyn Error + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/*
Boilerplate notes.

# Writer

Clone makes no sense for a trait object handed out behind an Arc.
PartialEq is left out for the same provenance-vs-data reason as on handles.
Send/Sync are required: handles are shared across threads and call the writer from any of them.

# BackendError

Clone/Eq are derived so tests can compare errors; Display comes from thiserror.
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitutes_positionally() {
        let one = 1;
        let args = [Forced::Borrowed(&one), Forced::Owned("2".to_string())];
        let message = Message::Template {
            template: "x={}, y={}",
            args: &args,
        };
        assert_eq!(message.render(), "x=1, y=2");
    }

    #[test]
    fn template_tolerates_mismatched_counts() {
        let args = [Forced::Owned("a".to_string())];
        let short = Message::Template {
            template: "{} and {}",
            args: &args,
        };
        assert_eq!(short.render(), "a and {}");

        let long = Message::Template {
            template: "only",
            args: &args,
        };
        assert_eq!(long.render(), "only");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn error_chain_includes_sources() {
        let error = Outer(std::io::Error::other("inner"));
        assert_eq!(render_error_chain(&error), "outer: inner");
    }
}
