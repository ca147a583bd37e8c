// src/lexer/tables/dfa.rs
use serde::{Deserialize, Serialize};

use super::LexTables;
use crate::error::ConfigError;

/// Inclusive code point range `from..=to` leading to `next`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct RangeTransition {
    pub from: u32,
    pub to: u32,
    pub next: u32,
}

impl RangeTransition {
    #[inline]
    pub fn contains(&self, c: u32) -> bool {
        self.from <= c && c <= self.to
    }
}

impl LexTables {
    /// Next state for `c`, or `None` when the DFA has no edge.
    #[inline]
    pub fn step(&self, state: u32, c: char) -> Option<u32> {
        let ranges = self.transitions.get(&state)?;
        let c = c as u32;
        // first range whose upper bound reaches c
        let i = ranges.partition_point(|r| r.to < c);
        ranges.get(i).filter(|r| r.contains(c)).map(|r| r.next)
    }
}

/// Sort a state's ranges and reject inverted or overlapping ones.
pub(crate) fn normalize_ranges(
    state: u32,
    ranges: &mut [RangeTransition],
) -> Result<(), ConfigError> {
    for r in ranges.iter() {
        if r.from > r.to {
            return Err(ConfigError::InvertedRange {
                state,
                from: r.from,
                to: r.to,
            });
        }
    }
    ranges.sort_by_key(|r| (r.from, r.to));
    for w in ranges.windows(2) {
        let (a, b) = (w[0], w[1]);
        if b.from <= a.to {
            return Err(ConfigError::OverlappingRanges {
                state,
                a_from: a.from,
                a_to: a.to,
                b_from: b.from,
                b_to: b.to,
            });
        }
    }
    Ok(())
}
