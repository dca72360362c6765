// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation from [Level] to a backend's own leveling scheme.
//!
//! A [LevelMap] is built once, when a [Registry](crate::Registry) is configured, and is then
//! shared by every handle that registry creates. The table is total by construction (one entry
//! per [Level]) and must be injective: two levels collapsing onto the same backend level would
//! make the backend unable to tell them apart.
//!
//! ```
//! use levelgate::{Level, LevelMap};
//!
//! let map = LevelMap::new([10u8, 20, 30, 40, 50, 255]);
//! assert_eq!(map.translate(Level::Warn), 40);
//! ```

use crate::Level;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelMap<L> {
    table: [L; 6],
}

impl<L: Copy + PartialEq + Debug> LevelMap<L> {
    /// Builds a map from a table indexed in [Level::ALL] order.
    ///
    /// # Panics
    ///
    /// Panics if two levels translate to the same backend level.
    pub fn new(table: [L; 6]) -> Self {
        for (i, a) in table.iter().enumerate() {
            for (j, b) in table.iter().enumerate().skip(i + 1) {
                if a == b {
                    panic!(
                        "level map is not injective: {} and {} both translate to {:?}",
                        Level::ALL[i],
                        Level::ALL[j],
                        a
                    );
                }
            }
        }
        Self { table }
    }

    #[inline]
    pub fn translate(&self, level: Level) -> L {
        self.table[level.index()]
    }
}

impl LevelMap<Level> {
    /// The map for backends that speak [Level] directly.
    pub const fn identity() -> Self {
        Self { table: Level::ALL }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_identity() {
        let map = LevelMap::identity();
        for level in Level::ALL {
            assert_eq!(map.translate(level), level);
        }
    }

    #[test]
    #[should_panic(expected = "not injective")]
    fn rejects_collapsed_levels() {
        LevelMap::new([1, 2, 3, 3, 4, 5]);
    }
}
