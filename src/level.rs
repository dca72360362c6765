// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels.

use std::fmt::Display;
use std::str::FromStr;

/// Severity of a logger handle, in ascending order.
///
/// `Off` is a sentinel: a handle at `Off` is never enabled and never reaches its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// Never enabled.
    Off,
}

impl Level {
    /// Every level, in ascending order.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Off,
    ];

    /// The level handed out when a logger is requested by name alone.
    pub const DEFAULT: Level = Level::Info;

    /// Position of the level within [Level::ALL].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::DEFAULT
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [Level].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{0}`")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/*
Boilerplate notes.

Copy/Clone/Eq/Ord/Hash are derived; the ordering is the severity ordering.
Default is Info, matching the level handed out for name-only lookups.
Display uses the upper-case names; FromStr accepts them case-insensitively.
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_severity() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Error < Level::Off);
        let mut sorted = Level::ALL;
        sorted.sort();
        assert_eq!(sorted, Level::ALL);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("warn".parse::<Level>(), Ok(Level::Warn));
        assert_eq!(" Off ".parse::<Level>(), Ok(Level::Off));
        assert_eq!(
            "verbose".parse::<Level>(),
            Err(ParseLevelError("verbose".to_string()))
        );
    }

    #[test]
    fn index_matches_all() {
        for (i, level) in Level::ALL.into_iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }
}
