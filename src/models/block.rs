//! Time block model.
//!
//! A time block is the smallest unit a partition is made of: a closed
//! integer interval of time steps within a representative period.
//!
//! # Time Model
//! Time steps are 1-based `usize` indices into the representative period.
//! The consumer defines what one step means (hour, quarter-hour, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous inclusive interval of time steps `[start, end]`.
///
/// Closed interval: both `start` and `end` belong to the block, so
/// `[5, 5]` is a single time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeBlock {
    /// First time step (inclusive).
    pub start: usize,
    /// Last time step (inclusive).
    pub end: usize,
}

impl TimeBlock {
    /// Creates a new time block. Validity is not checked; see [`is_valid`](Self::is_valid).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of time steps in this block (0 for an inverted block).
    #[inline]
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Whether this block covers no time steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `1 <= start <= end`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start >= 1 && self.start <= self.end
    }

    /// Whether a time step falls within this block.
    #[inline]
    pub fn contains(&self, step: usize) -> bool {
        step >= self.start && step <= self.end
    }

    /// Number of time steps shared with another block.
    pub fn overlap_len(&self, other: &Self) -> usize {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end >= start {
            end - start + 1
        } else {
            0
        }
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl From<(usize, usize)> for TimeBlock {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}
