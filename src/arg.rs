// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tagged message arguments.
//!
//! A template call takes a slice of [Arg]s. Each entry is either a plain value, which is handed
//! to the backend as-is, or a deferred computation ([Supplier]) that is only run once the handle
//! has confirmed the record will be emitted.
//!
//! ```
//! use levelgate::Arg;
//!
//! let user = "alice";
//! let expensive = || (0..10).sum::<u32>();
//! let args = [Arg::value(&user), Arg::lazy(&expensive)];
//! assert!(args[1].is_deferred());
//! ```

use std::fmt::{Debug, Display};

/// A zero-argument computation producing a displayable value.
///
/// Implemented for every `Fn() -> T` where `T: Display`.
pub trait Supplier {
    /// Runs the computation and renders its result.
    fn supply(&self) -> String;
}

impl<F, T> Supplier for F
where
    F: Fn() -> T,
    T: Display,
{
    #[inline]
    fn supply(&self) -> String {
        self().to_string()
    }
}

/// One positional argument of a template call.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Value(&'a dyn Display),
    Deferred(&'a dyn Supplier),
}

impl<'a> Arg<'a> {
    #[inline]
    pub fn value<T: Display>(value: &'a T) -> Self {
        Arg::Value(value)
    }

    #[inline]
    pub fn lazy<S: Supplier>(supplier: &'a S) -> Self {
        Arg::Deferred(supplier)
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Arg::Deferred(_))
    }

    /// Runs a deferred argument; plain values pass through borrowed.
    pub(crate) fn force(self) -> Forced<'a> {
        match self {
            Arg::Value(value) => Forced::Borrowed(value),
            Arg::Deferred(supplier) => Forced::Owned(supplier.supply()),
        }
    }
}

impl Debug for Arg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Value(value) => f.debug_tuple("Value").field(&value.to_string()).finish(),
            Arg::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// An argument after forcing, as seen by the backend.
pub enum Forced<'a> {
    Borrowed(&'a dyn Display),
    Owned(String),
}

impl Display for Forced<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Forced::Borrowed(value) => Display::fmt(value, f),
            Forced::Owned(value) => f.write_str(value),
        }
    }
}

impl Debug for Forced<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.to_string())
    }
}

/// Forces every deferred argument exactly once, left to right.
pub(crate) fn force_all<'a>(args: &[Arg<'a>]) -> Vec<Forced<'a>> {
    args.iter().map(|arg| arg.force()).collect()
}
